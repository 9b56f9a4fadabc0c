//! Error types for JSON sessions.
//!
//! # Design
//! A status-code mismatch is the one failure callers routinely inspect, so
//! `Response` carries the status and the parsed server error body. Every
//! other failure keeps its cause as text. `kind()` folds the variants into
//! the three classes callers branch on: bad configuration, unexpected
//! response, and transport trouble (I/O or JSON).

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = SessionError> = std::result::Result<T, E>;

/// Errors returned by `SessionBuilder` and `Session`.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The builder was given something unusable: a missing or unparsable
    /// URL, a bad header, or a body sent on a session without output.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// The server answered with a status other than the expected one.
    #[error("Failed: Http error code: {status}")]
    Response {
        status: u16,
        /// The error body parsed as JSON. `Null` when the body was empty and
        /// a JSON string holding the raw text when it was not JSON.
        server_error: serde_json::Value,
    },

    /// Connecting, writing the request or reading the response failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The success body could not be deserialized into the requested type.
    #[error("failed to decode response body: {0}")]
    Decode(String),

    /// The request payload could not be serialized to JSON.
    #[error("failed to serialize request body: {0}")]
    Serialization(String),
}

/// Coarse classification of a `SessionError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Response,
    Transport,
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::Configuration(_) => ErrorKind::Configuration,
            SessionError::Response { .. } => ErrorKind::Response,
            SessionError::Transport(_)
            | SessionError::Decode(_)
            | SessionError::Serialization(_) => ErrorKind::Transport,
        }
    }

    /// The status code of a mismatched response.
    pub fn status(&self) -> Option<u16> {
        match self {
            SessionError::Response { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The parsed error body of a mismatched response.
    pub fn server_error(&self) -> Option<&serde_json::Value> {
        match self {
            SessionError::Response { server_error, .. } => Some(server_error),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn response_display_contains_status() {
        let err = SessionError::Response {
            status: 404,
            server_error: json!({"message": "not found"}),
        };
        assert_eq!(err.to_string(), "Failed: Http error code: 404");
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.server_error(), Some(&json!({"message": "not found"})));
    }

    #[test]
    fn configuration_display() {
        let err = SessionError::Configuration("missing url".to_owned());
        assert_eq!(err.to_string(), "invalid configuration: missing url");
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn json_failures_classify_as_transport() {
        assert_eq!(SessionError::Decode("eof".into()).kind(), ErrorKind::Transport);
        assert_eq!(SessionError::Serialization("map key".into()).kind(), ErrorKind::Transport);
        assert_eq!(SessionError::Transport("refused".into()).kind(), ErrorKind::Transport);
    }

    #[test]
    fn non_response_errors_have_no_server_error() {
        let err = SessionError::Transport("broken pipe".to_owned());
        assert!(err.status().is_none());
        assert!(err.server_error().is_none());
    }
}
