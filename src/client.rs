use std::sync::Arc;

use crate::error::{RecommenderError, Result};
use crate::transport::{network_error, HttpTransport, RawResponse};

/// HTTP access to a single catalog provider.
///
/// Statuses are handed back untranslated; callers decide what a 202 or a
/// 404 means. No retries happen here.
#[derive(Clone)]
pub struct ProviderClient {
    provider: String,
    base_url: String,
    transport: Arc<dyn HttpTransport>,
}

impl ProviderClient {
    pub fn new(
        provider: impl Into<String>,
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            provider: provider.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Build `<base>/<path>?k=v&...` with every value URL-encoded
    pub fn url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        for (i, (key, value)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url
    }

    /// Issue one GET
    pub async fn fetch(&self, url: &str) -> Result<RawResponse> {
        tracing::debug!("[{}] GET {}", self.provider, url);
        self.transport
            .get(url)
            .await
            .map_err(|e| network_error(&self.provider, e))
    }

    /// Body of a 2xx response, `TransportError` otherwise
    pub fn ensure_success(&self, response: RawResponse) -> Result<String> {
        if response.is_success() {
            return Ok(response.body);
        }
        Err(RecommenderError::transport(
            &self.provider,
            Some(response.status),
            format!("HTTP {}", response.status),
        ))
    }

    /// `fetch` followed by `ensure_success`
    pub async fn fetch_ok(&self, url: &str) -> Result<String> {
        let response = self.fetch(url).await?;
        self.ensure_success(response)
    }
}
