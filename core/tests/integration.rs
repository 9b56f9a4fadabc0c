//! Session and resource client against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every send variant
//! and every `ResourceClient` verb over real HTTP through the default ureq
//! transport.

use std::time::Duration;

use json_session::{DeleteResult, ErrorKind, HttpMethod, ResourceClient, Session, SessionError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Seller {
    id: i64,
    name: String,
    address: String,
    phone: String,
}

fn seller(id: i64, n: &str) -> Seller {
    Seller {
        id,
        name: format!("Seller {n}"),
        address: format!("Address {n}"),
        phone: format!("Phone {n}"),
    }
}

/// Start a fresh mock server and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn session_lifecycle() {
    let base = start_server();
    let sellers_url = format!("{base}/sellers");

    // Step 1: list — should be empty.
    let sellers: Vec<Seller> = Session::builder()
        .to(&sellers_url)
        .build()
        .unwrap()
        .send_request_expecting_list()
        .unwrap();
    assert!(sellers.is_empty(), "expected empty list");

    // Step 2: create two sellers.
    for n in ["1", "2"] {
        let created: Seller = Session::builder()
            .to(&sellers_url)
            .with_method(HttpMethod::Post)
            .with_output(true)
            .with_response_code(200)
            .build()
            .unwrap()
            .send_request_with_body(&seller(0, n))
            .unwrap();
        assert_eq!(created.name, format!("Seller {n}"));
    }

    // Step 3: list — two items, and the pretty-printed listing decodes the same.
    let sellers: Vec<Seller> = Session::builder()
        .to(&sellers_url)
        .with_read_timeout(Duration::from_secs(5))
        .build()
        .unwrap()
        .send_request_expecting_list()
        .unwrap();
    assert_eq!(sellers.len(), 2);
    let pretty: Vec<Seller> = Session::builder()
        .to(format!("{sellers_url}/pretty"))
        .build()
        .unwrap()
        .send_request_expecting_list()
        .unwrap();
    assert_eq!(pretty, sellers);

    // Step 4: get the first by id.
    let id = sellers[0].id;
    let fetched: Seller = Session::builder()
        .to(format!("{sellers_url}/{id}"))
        .build()
        .unwrap()
        .send_request()
        .unwrap();
    assert_eq!(fetched, sellers[0]);

    // Step 5: put with an encoded body, then patch with a raw JSON string.
    let replacement = seller(id, "Updated");
    let updated: Seller = Session::builder()
        .to(format!("{sellers_url}/{id}"))
        .with_method(HttpMethod::Put)
        .with_output(true)
        .build()
        .unwrap()
        .send_request_with_body(&replacement)
        .unwrap();
    assert_eq!(updated, replacement);

    let patched: Seller = Session::builder()
        .to(format!("{sellers_url}/{id}"))
        .with_method(HttpMethod::Patch)
        .with_output(true)
        .build()
        .unwrap()
        .send_request_with_raw_body(r#"{"phone":"Phone 9"}"#)
        .unwrap();
    assert_eq!(patched.phone, "Phone 9");
    assert_eq!(patched.name, "Seller Updated");

    // Step 6: delete.
    let deleted: DeleteResult = Session::builder()
        .to(format!("{sellers_url}/{id}"))
        .with_method(HttpMethod::Delete)
        .build()
        .unwrap()
        .send_request()
        .unwrap();
    assert_eq!(deleted.success, 1);

    // Step 7: get after delete — Response error carrying the server's body.
    let err = Session::builder()
        .to(format!("{sellers_url}/{id}"))
        .build()
        .unwrap()
        .send_request::<Seller>()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Response);
    assert!(err.to_string().contains("404"));
    let server_error = err.server_error().unwrap();
    assert_eq!(server_error["status"], 404);
    assert_eq!(server_error["path"], format!("/sellers/{id}"));
}

#[test]
fn unexpected_success_code_is_response_error() {
    let base = start_server();
    let err = Session::builder()
        .to(format!("{base}/sellers"))
        .with_response_code(201)
        .build()
        .unwrap()
        .send_request_expecting_list::<Seller>()
        .unwrap_err();
    assert!(matches!(err, SessionError::Response { status: 200, .. }));
}

#[test]
fn wrong_shape_is_decode_error() {
    let base = start_server();
    let err = Session::builder()
        .to(format!("{base}/sellers"))
        .build()
        .unwrap()
        .send_request::<Seller>()
        .unwrap_err();
    assert!(matches!(err, SessionError::Decode(_)));
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn resource_client_crud() {
    let base = start_server();
    let client = ResourceClient::new(&format!("{base}/sellers/"))
        .unwrap()
        .with_connect_timeout(Duration::from_secs(2));

    let created = client.post(&seller(0, "A")).unwrap();
    assert_eq!(created.name, "Seller A");

    let all: Vec<Seller> = client.get().unwrap();
    assert_eq!(all, vec![created.clone()]);

    let fetched: Seller = client.get_by_id(created.id).unwrap();
    assert_eq!(fetched, created);

    let updated = client.put(created.id, &seller(created.id, "B")).unwrap();
    assert_eq!(updated.name, "Seller B");

    assert_eq!(client.delete(created.id).unwrap(), DeleteResult { success: 1 });

    let err = client.delete(created.id).unwrap_err();
    assert_eq!(err.status(), Some(404));
}
