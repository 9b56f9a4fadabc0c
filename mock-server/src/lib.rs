use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Seller {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
}

/// Body accepted by POST and PUT. Any `id` in the payload is ignored.
#[derive(Deserialize)]
pub struct SellerInput {
    pub name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Deserialize)]
pub struct SellerPatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Default)]
pub struct Store {
    next_id: i64,
    sellers: BTreeMap<i64, Seller>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/sellers", get(list_sellers).post(create_seller))
        .route("/sellers/pretty", get(list_sellers_pretty))
        .route(
            "/sellers/{id}",
            get(get_seller)
                .put(update_seller)
                .patch(patch_seller)
                .delete(delete_seller),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// JSON error body shaped like a Spring Boot error response.
fn not_found(id: i64) -> Response {
    let body = json!({
        "status": 404,
        "error": "Not Found",
        "message": format!("seller {id} not found"),
        "path": format!("/sellers/{id}"),
    });
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}

async fn list_sellers(State(db): State<Db>) -> Json<Vec<Seller>> {
    let store = db.read().await;
    Json(store.sellers.values().cloned().collect())
}

/// Same listing, pretty-printed across several lines.
async fn list_sellers_pretty(State(db): State<Db>) -> Response {
    let store = db.read().await;
    let sellers: Vec<&Seller> = store.sellers.values().collect();
    match serde_json::to_string_pretty(&sellers) {
        Ok(body) => ([(header::CONTENT_TYPE, "application/json")], body).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

async fn create_seller(State(db): State<Db>, Json(input): Json<SellerInput>) -> Json<Seller> {
    let mut store = db.write().await;
    store.next_id += 1;
    let seller = Seller {
        id: store.next_id,
        name: input.name,
        address: input.address,
        phone: input.phone,
    };
    store.sellers.insert(seller.id, seller.clone());
    Json(seller)
}

async fn get_seller(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let store = db.read().await;
    match store.sellers.get(&id) {
        Some(seller) => Json(seller.clone()).into_response(),
        None => not_found(id),
    }
}

async fn update_seller(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<SellerInput>,
) -> Response {
    let mut store = db.write().await;
    let Some(seller) = store.sellers.get_mut(&id) else {
        return not_found(id);
    };
    seller.name = input.name;
    seller.address = input.address;
    seller.phone = input.phone;
    Json(seller.clone()).into_response()
}

async fn patch_seller(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<SellerPatch>,
) -> Response {
    let mut store = db.write().await;
    let Some(seller) = store.sellers.get_mut(&id) else {
        return not_found(id);
    };
    if let Some(name) = input.name {
        seller.name = name;
    }
    if let Some(address) = input.address {
        seller.address = address;
    }
    if let Some(phone) = input.phone {
        seller.phone = phone;
    }
    Json(seller.clone()).into_response()
}

async fn delete_seller(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    let mut store = db.write().await;
    match store.sellers.remove(&id) {
        Some(_) => Json(json!({ "success": 1 })).into_response(),
        None => not_found(id),
    }
}
