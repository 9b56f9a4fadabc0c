//! Per-verb convenience client for a REST collection.
//!
//! # Design
//! `ResourceClient` holds only a base URL and timeouts. Each verb presets
//! method, body flag and expected status (always 200) on a fresh
//! `SessionBuilder`, then runs the usual single exchange. Item operations
//! address `{base_url}/{id}`.

use std::fmt::Display;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::SessionBuilder;
use crate::error::{Result, SessionError};
use crate::http::HttpMethod;
use crate::session::Session;
use crate::transport::{Connector, UreqConnector};

/// Body returned by a collection's delete endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub success: i64,
}

/// Client for the standard CRUD endpoints of one collection.
#[derive(Debug, Clone)]
pub struct ResourceClient<C = UreqConnector> {
    base_url: String,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    connector: C,
}

impl ResourceClient {
    /// Fails with `Configuration` when `base_url` is not an absolute URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_connector(base_url, UreqConnector)
    }
}

impl<C: Connector> ResourceClient<C> {
    pub fn with_connector(base_url: &str, connector: C) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| {
            SessionError::Configuration(format!(
                "There is a problem with the provided url: {base_url} ({e})"
            ))
        })?;
        Ok(Self {
            base_url,
            connect_timeout: None,
            read_timeout: None,
            connector,
        })
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the whole collection.
    pub fn get<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.session(&self.base_url, HttpMethod::Get, false)?
            .send_request_expecting_list()
    }

    pub fn get_by_id<T: DeserializeOwned>(&self, id: impl Display) -> Result<T> {
        self.session(&self.item_url(id), HttpMethod::Get, false)?
            .send_request()
    }

    /// Create `entity`, returning the server's copy.
    pub fn post<T>(&self, entity: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.session(&self.base_url, HttpMethod::Post, true)?
            .send_request_with_body(entity)
    }

    /// Replace the item `id` with `entity`, returning the server's copy.
    pub fn put<T>(&self, id: impl Display, entity: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        self.session(&self.item_url(id), HttpMethod::Put, true)?
            .send_request_with_body(entity)
    }

    pub fn delete(&self, id: impl Display) -> Result<DeleteResult> {
        self.session(&self.item_url(id), HttpMethod::Delete, false)?
            .send_request()
    }

    fn item_url(&self, id: impl Display) -> String {
        format!("{}/{id}", self.base_url)
    }

    fn session(&self, url: &str, method: HttpMethod, output: bool) -> Result<Session<C::Connection>> {
        let mut builder = SessionBuilder::new()
            .to(url)
            .with_method(method)
            .with_output(output)
            .with_response_code(200);
        if let Some(timeout) = self.connect_timeout {
            builder = builder.with_connect_timeout(timeout);
        }
        if let Some(timeout) = self.read_timeout {
            builder = builder.with_read_timeout(timeout);
        }
        builder.build_with(&self.connector)
    }
}
