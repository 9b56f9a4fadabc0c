//! JSON encode/decode boundary and status interpretation.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, SessionError};
use crate::http::HttpResponse;

/// Serialize a request body to JSON bytes.
pub fn encode<B: Serialize + ?Sized>(body: &B) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| SessionError::Serialization(e.to_string()))
}

/// Deserialize a complete response body into `T`.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| SessionError::Decode(e.to_string()))
}

/// Parse the body of an error response.
///
/// Servers do not always answer errors with JSON, so this never fails: an
/// empty body becomes `Null` and anything unparsable is kept verbatim as a
/// JSON string.
pub fn parse_server_error(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}

/// Map a status other than `expected` to `SessionError::Response`.
pub fn check_status(response: &HttpResponse, expected: u16) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    Err(SessionError::Response {
        status: response.status,
        server_error: parse_server_error(&response.body),
    })
}
