//! Outbound HTTP used by the seed pipeline.
//!
//! Every transport, status, or decoding failure is collapsed into the opaque
//! [`UpstreamError`]; details are logged where they happen and never handed
//! to callers.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
#[error("upstream request to {url} failed")]
pub struct UpstreamError {
    url: String,
}

impl UpstreamError {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
pub trait HttpAdapter: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError>;
}

impl dyn HttpAdapter {
    /// Fetches `url` and decodes the body into `T`.
    pub async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, UpstreamError> {
        let body = self.get_json(url).await?;
        serde_json::from_value(body).map_err(|err| {
            error!(url, error = %err, "upstream payload did not match the expected shape");
            UpstreamError::new(url)
        })
    }
}

/// Configuration for the HTTP client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Timeout for establishing a connection.
    pub connect_timeout: Duration,
    /// Timeout for the entire request.
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct ReqwestHttpAdapter {
    client: Client,
}

impl ReqwestHttpAdapter {
    pub fn new(config: &HttpClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpAdapter for ReqwestHttpAdapter {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        debug!(url, "fetching upstream resource");

        let response = self.client.get(url).send().await.map_err(|err| {
            error!(url, error = %err, "upstream request could not be sent");
            UpstreamError::new(url)
        })?;

        let response = response.error_for_status().map_err(|err| {
            error!(url, error = %err, "upstream responded with an error status");
            UpstreamError::new(url)
        })?;

        response.json::<Value>().await.map_err(|err| {
            error!(url, error = %err, "upstream body is not valid JSON");
            UpstreamError::new(url)
        })
    }
}

/// Serves canned JSON bodies keyed by URL. Unknown URLs fail like an
/// unreachable upstream.
#[derive(Debug, Default, Clone)]
pub struct StaticHttpAdapter {
    responses: HashMap<String, Value>,
}

impl StaticHttpAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(mut self, url: impl Into<String>, body: Value) -> Self {
        self.responses.insert(url.into(), body);
        self
    }
}

#[async_trait]
impl HttpAdapter for StaticHttpAdapter {
    async fn get_json(&self, url: &str) -> Result<Value, UpstreamError> {
        self.responses.get(url).cloned().ok_or_else(|| {
            error!(url, "no canned response registered");
            UpstreamError::new(url)
        })
    }
}
