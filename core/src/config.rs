//! Session configuration and its builder.
//!
//! # Design
//! `SessionBuilder` collects loose settings and only validates them when a
//! session is requested. `config()` is the validation step on its own: it
//! never touches the network, so an unparsable URL is reported before any
//! connection is attempted.

use std::collections::BTreeMap;
use std::time::Duration;

use url::Url;

use crate::error::{Result, SessionError};
use crate::http::{HttpMethod, HttpRequest};
use crate::session::Session;
use crate::transport::{Connector, UreqConnection, UreqConnector};

pub const DEFAULT_RESPONSE_CODE: u16 = 200;

/// The default header set: JSON in, JSON out.
pub fn json_properties() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Accept".to_string(), "application/json".to_string()),
    ])
}

/// Validated, immutable settings for one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub url: Url,
    pub method: HttpMethod,
    pub expected_status: u16,
    pub has_body: bool,
    pub headers: BTreeMap<String, String>,
    /// `None` waits indefinitely.
    pub connect_timeout: Option<Duration>,
    /// `None` waits indefinitely.
    pub read_timeout: Option<Duration>,
}

impl RequestConfig {
    /// The request line and headers this configuration sends, without a body.
    pub fn request(&self) -> HttpRequest {
        HttpRequest {
            method: self.method,
            url: self.url.to_string(),
            headers: self
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            body: None,
        }
    }
}

/// Chainable builder for [`Session`].
///
/// Defaults: GET, expected status 200, no request body, JSON headers and no
/// timeouts.
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    url: Option<String>,
    method: HttpMethod,
    expected_status: u16,
    has_body: bool,
    headers: BTreeMap<String, String>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            url: None,
            method: HttpMethod::Get,
            expected_status: DEFAULT_RESPONSE_CODE,
            has_body: false,
            headers: json_properties(),
            connect_timeout: None,
            read_timeout: None,
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target URL. Required before `build`.
    pub fn to(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the status code that counts as success. `None` resets it to 200.
    pub fn with_response_code(mut self, code: impl Into<Option<u16>>) -> Self {
        self.expected_status = code.into().unwrap_or(DEFAULT_RESPONSE_CODE);
        self
    }

    /// Whether the exchange carries a request body. `None` resets it to
    /// `false`.
    pub fn with_output(mut self, output: impl Into<Option<bool>>) -> Self {
        self.has_body = output.into().unwrap_or(false);
        self
    }

    /// Replace the whole header map.
    pub fn with_request_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers = properties
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Validate the collected settings without opening anything.
    pub fn config(&self) -> Result<RequestConfig> {
        let raw = self
            .url
            .as_deref()
            .ok_or_else(|| SessionError::Configuration("url is required".to_owned()))?;
        let url = Url::parse(raw).map_err(|e| {
            SessionError::Configuration(format!(
                "There is a problem with the provided url: {raw} ({e})"
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(SessionError::Configuration(format!(
                "unsupported url scheme: {}",
                url.scheme()
            )));
        }
        Ok(RequestConfig {
            url,
            method: self.method,
            expected_status: self.expected_status,
            has_body: self.has_body,
            headers: self.headers.clone(),
            connect_timeout: self.connect_timeout,
            read_timeout: self.read_timeout,
        })
    }

    /// Validate and open a session over the default ureq transport.
    pub fn build(self) -> Result<Session<UreqConnection>> {
        self.build_with(&UreqConnector)
    }

    /// Validate and open a session over `connector`.
    pub fn build_with<C: Connector>(self, connector: &C) -> Result<Session<C::Connection>> {
        let config = self.config()?;
        let connection = connector.open(&config)?;
        tracing::debug!(method = %config.method, url = %config.url, "session opened");
        Ok(Session::new(config, connection))
    }
}
