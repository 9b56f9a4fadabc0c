//! Single-use typed JSON session.
//!
//! # Design
//! Every `send_*` method consumes the session, so a session can only ever
//! perform one exchange. The connection is closed in `Drop`, which runs on
//! every exit path of a send (success, status mismatch, I/O or decode
//! failure) and also when a session is dropped unused.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec;
use crate::config::{RequestConfig, SessionBuilder};
use crate::error::{Result, SessionError};
use crate::http::HttpResponse;
use crate::transport::Connection;

/// A configured request bound to one open connection.
pub struct Session<C: Connection> {
    config: RequestConfig,
    connection: C,
}

impl<C: Connection> fmt::Debug for Session<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Session<crate::transport::UreqConnection> {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }
}

impl<C: Connection> Session<C> {
    pub(crate) fn new(config: RequestConfig, connection: C) -> Self {
        Self { config, connection }
    }

    pub fn config(&self) -> &RequestConfig {
        &self.config
    }

    /// Send the request without a body and decode the response as `T`.
    pub fn send_request<T: DeserializeOwned>(mut self) -> Result<T> {
        let response = self.exchange(None)?;
        codec::decode(&response.body)
    }

    /// Send the request without a body and decode the response as a JSON
    /// array of `T`.
    pub fn send_request_expecting_list<T: DeserializeOwned>(mut self) -> Result<Vec<T>> {
        let response = self.exchange(None)?;
        codec::decode(&response.body)
    }

    /// Serialize `body` to JSON, send it, and decode the response as `T`.
    pub fn send_request_with_body<T, B>(mut self, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.ensure_output()?;
        let payload = codec::encode(body)?;
        let response = self.exchange(Some(payload.as_slice()))?;
        codec::decode(&response.body)
    }

    /// Send an already-encoded JSON string and decode the response as `T`.
    pub fn send_request_with_raw_body<T: DeserializeOwned>(mut self, json: &str) -> Result<T> {
        self.ensure_output()?;
        let response = self.exchange(Some(json.as_bytes()))?;
        codec::decode(&response.body)
    }

    /// Perform the exchange and hand back the raw response once the status
    /// matched.
    pub fn send_raw(mut self) -> Result<HttpResponse> {
        self.exchange(None)
    }

    fn ensure_output(&self) -> Result<()> {
        if self.config.has_body {
            return Ok(());
        }
        Err(SessionError::Configuration(
            "request body not enabled for this session; use with_output(true)".to_owned(),
        ))
    }

    fn exchange(&mut self, payload: Option<&[u8]>) -> Result<HttpResponse> {
        if let Some(payload) = payload {
            self.connection.write_body(payload)?;
        }
        let response = self.connection.execute()?;
        tracing::debug!(
            method = %self.config.method,
            url = %self.config.url,
            status = response.status,
            "exchange complete"
        );
        if let Err(e) = codec::check_status(&response, self.config.expected_status) {
            tracing::warn!(
                expected = self.config.expected_status,
                status = response.status,
                url = %self.config.url,
                "unexpected response status"
            );
            return Err(e);
        }
        Ok(response)
    }
}

impl<C: Connection> Drop for Session<C> {
    fn drop(&mut self) {
        self.connection.close();
    }
}
