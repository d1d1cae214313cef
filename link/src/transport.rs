//! HTTP transport seam.
//!
//! The client only ever issues GET requests and inspects the status and
//! body; everything below that — connection handling, TLS, timeouts — lives
//! behind the [`Transport`] trait. Tests inject scripted implementations.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use crate::error::{MirageLinkError, Result};

/// Raw outcome of one request: the status code and the undecoded body.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// One blocking (awaited) GET per unresolved piece of data.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET for a path-and-query string relative to the server root,
    /// e.g. `/cars/1/drivers/0..4`.
    async fn get(&self, path: &str) -> Result<TransportResponse>;
}

/// Production transport over a pooled `reqwest` client.
pub struct HttpTransport {
    base_url: url::Url,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base(base_url)?;
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, http_client })
    }
}

/// Parse the server root and ensure its path ends in `/`, so joining a
/// request path keeps any path component of the base
/// (`http://host/api` + `/cars/1` → `http://host/api/cars/1`).
fn normalize_base(base_url: &str) -> Result<url::Url> {
    let mut base = url::Url::parse(base_url)
        .map_err(|e| MirageLinkError::InvalidUrl(format!("{base_url}: {e}")))?;
    if base.cannot_be_a_base() {
        return Err(MirageLinkError::InvalidUrl(base_url.to_string()));
    }
    if !base.path().ends_with('/') {
        base.set_path(&format!("{}/", base.path()));
    }
    Ok(base)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str) -> Result<TransportResponse> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| MirageLinkError::InvalidUrl(format!("{path}: {e}")))?;
        debug!("[LINK_HTTP] GET {url}");
        let response = self.http_client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("[LINK_HTTP] status={status} body_len={}", body.len());
        Ok(TransportResponse { status, body })
    }
}
