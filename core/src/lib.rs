//! Builder-configured, single-use JSON sessions over HTTP.
//!
//! # Overview
//! A `SessionBuilder` collects the target URL, method, expected status code,
//! body flag and headers, then opens a `Session`. The session performs one
//! request/response exchange: it optionally writes a JSON body, checks the
//! status code, and decodes the response into the caller's type.
//!
//! # Design
//! - Send methods consume the session; the connection is closed exactly once
//!   when the session drops.
//! - Every failure is a `SessionError`. A status mismatch carries the parsed
//!   server error body; nothing is reported as an empty or missing value.
//! - The network sits behind the `Connector`/`Connection` traits. The default
//!   transport uses `ureq`.
//! - `ResourceClient` wraps the usual CRUD verbs for one collection.
//!
//! ```no_run
//! use json_session::{HttpMethod, Session};
//! # #[derive(serde::Deserialize)] struct Seller { id: i64, name: String }
//! # fn main() -> json_session::Result<()> {
//! let sellers: Vec<Seller> = Session::builder()
//!     .to("http://localhost:8080/sellers")
//!     .with_method(HttpMethod::Get)
//!     .build()?
//!     .send_request_expecting_list()?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod http;
pub mod resource;
pub mod session;
pub mod transport;

pub use config::{json_properties, RequestConfig, SessionBuilder};
pub use error::{ErrorKind, Result, SessionError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{DeleteResult, ResourceClient};
pub use session::Session;
pub use transport::{Connection, Connector, UreqConnection, UreqConnector};
