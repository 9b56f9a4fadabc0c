//! Connection seam between a `Session` and the network.
//!
//! # Design
//! A `Connector` opens one `Connection` per session. The connection is used
//! for exactly one exchange: an optional body write, one `execute`, then
//! `close`. `UreqConnection` is the production implementation; tests plug in
//! fakes that record what the session did.

use std::fmt;

use ureq::http;

use crate::config::RequestConfig;
use crate::error::{Result, SessionError};
use crate::http::HttpResponse;

/// One single-use request/response exchange.
pub trait Connection {
    /// Write the full request payload. Called at most once, before `execute`.
    fn write_body(&mut self, payload: &[u8]) -> Result<()>;

    /// Send the request and read the whole response, whatever its status.
    fn execute(&mut self) -> Result<HttpResponse>;

    /// Release the connection. Called exactly once by the owning session.
    fn close(&mut self);
}

/// Opens connections bound to a configuration.
pub trait Connector {
    type Connection: Connection;

    fn open(&self, config: &RequestConfig) -> Result<Self::Connection>;
}

/// Connector backed by a `ureq` agent.
#[derive(Debug, Clone, Copy, Default)]
pub struct UreqConnector;

impl Connector for UreqConnector {
    type Connection = UreqConnection;

    fn open(&self, config: &RequestConfig) -> Result<UreqConnection> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_connect(config.connect_timeout)
            .timeout_recv_response(config.read_timeout)
            .timeout_recv_body(config.read_timeout)
            .build()
            .new_agent();

        let prepared = config.request();
        let mut builder = http::Request::builder()
            .method(prepared.method.as_str())
            .uri(prepared.url.as_str());
        for (name, value) in &prepared.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        let request = builder
            .body(())
            .map_err(|e| SessionError::Configuration(format!("invalid request: {e}")))?;

        Ok(UreqConnection {
            agent,
            request: Some(request),
            payload: None,
        })
    }
}

/// A prepared ureq request waiting for its single exchange.
pub struct UreqConnection {
    agent: ureq::Agent,
    request: Option<http::Request<()>>,
    payload: Option<Vec<u8>>,
}

impl fmt::Debug for UreqConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqConnection")
            .field("request", &self.request)
            .field("payload_len", &self.payload.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl Connection for UreqConnection {
    fn write_body(&mut self, payload: &[u8]) -> Result<()> {
        if self.request.is_none() {
            return Err(SessionError::Transport("connection already used".to_owned()));
        }
        self.payload = Some(payload.to_vec());
        Ok(())
    }

    fn execute(&mut self) -> Result<HttpResponse> {
        let request = self
            .request
            .take()
            .ok_or_else(|| SessionError::Transport("connection already used".to_owned()))?;
        let (parts, ()) = request.into_parts();

        let result = match self.payload.take() {
            Some(payload) => self.agent.run(http::Request::from_parts(parts, payload)),
            None => self.agent.run(http::Request::from_parts(parts, ())),
        };
        let mut response = result.map_err(|e| SessionError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SessionError::Transport(e.to_string()))?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }

    fn close(&mut self) {
        self.request = None;
        self.payload = None;
    }
}
