use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{RecommenderError, Result};

/// Status and body of one HTTP exchange, status left untranslated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP GET seam. Constructed once per process and shared.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a GET. Only network-level failures are errors; every
    /// HTTP status, including non-2xx, comes back as a [`RawResponse`].
    async fn get(&self, url: &str) -> Result<RawResponse>;
}

/// reqwest-backed transport
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("boardgame-recommender/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(RawResponse { status, body })
    }
}

/// Attach the provider name to a raw reqwest failure
pub(crate) fn network_error(provider: &str, err: RecommenderError) -> RecommenderError {
    match err {
        RecommenderError::HttpRequest(e) => {
            let status = e.status().map(|s| s.as_u16());
            RecommenderError::transport(provider, status, format!("request failed: {}", e))
        }
        other => other,
    }
}
