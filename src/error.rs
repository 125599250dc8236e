use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest payload excerpt carried by a [`RecommenderError::MalformedResponse`]
pub const SNIPPET_CHARS: usize = 120;

/// Main error type for the recommendation pipeline
#[derive(Error, Debug)]
pub enum RecommenderError {
    /// Provider never left its "processing" state within the attempt budget
    #[error("Provider '{provider}' still processing after {attempts} attempts")]
    ProviderTimeout { provider: String, attempts: u32 },

    /// Payload could not be parsed
    #[error("Malformed response from '{provider}': {reason} (payload: {snippet:?})")]
    MalformedResponse {
        provider: String,
        reason: String,
        snippet: String,
    },

    /// Provider answered with an unexpected HTTP status or the call itself failed
    #[error("Provider '{provider}' transport error: {message}")]
    Transport {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    /// HTTP client errors raised outside a provider call
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller sent parameters that cannot be turned into a search request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Caller-visible classification of a [`RecommenderError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ProviderTimeout,
    MalformedResponse,
    TransportError,
    ConfigError,
    InvalidRequest,
}

impl RecommenderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ProviderTimeout { .. } => ErrorKind::ProviderTimeout,
            Self::MalformedResponse { .. } => ErrorKind::MalformedResponse,
            Self::Transport { .. } | Self::HttpRequest(_) => ErrorKind::TransportError,
            Self::Config(_) => ErrorKind::ConfigError,
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    /// Build a `MalformedResponse`, keeping only a short prefix of the payload
    pub fn malformed(provider: &str, reason: impl ToString, payload: &str) -> Self {
        Self::MalformedResponse {
            provider: provider.to_string(),
            reason: reason.to_string(),
            snippet: snippet(payload),
        }
    }

    pub fn transport(provider: &str, status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Transport {
            provider: provider.to_string(),
            status,
            message: message.into(),
        }
    }
}

fn snippet(payload: &str) -> String {
    let trimmed = payload.trim();
    if trimmed.chars().count() <= SNIPPET_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(SNIPPET_CHARS).collect();
    cut.push_str("...");
    cut
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RecommenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = RecommenderError::ProviderTimeout {
            provider: "bgg".into(),
            attempts: 3,
        };
        assert_eq!(err.kind(), ErrorKind::ProviderTimeout);

        let err = RecommenderError::transport("atlas", Some(500), "HTTP 500");
        assert_eq!(err.kind(), ErrorKind::TransportError);

        let err = RecommenderError::Config("bad".into());
        assert_eq!(err.kind(), ErrorKind::ConfigError);

        let err = RecommenderError::InvalidRequest("players: invalid digit".into());
        assert_eq!(err.kind(), ErrorKind::InvalidRequest);
        assert_eq!(serde_json::to_value(err.kind()).unwrap(), "invalid_request");
    }

    #[test]
    fn test_malformed_snippet_is_truncated() {
        let payload = "x".repeat(500);
        match RecommenderError::malformed("bgg", "unexpected end", &payload) {
            RecommenderError::MalformedResponse { provider, snippet, .. } => {
                assert_eq!(provider, "bgg");
                assert_eq!(snippet.chars().count(), SNIPPET_CHARS + 3);
                assert!(snippet.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_short_snippet_kept_whole() {
        let err = RecommenderError::malformed("bgg", "oops", "  <items>  ");
        assert!(err.to_string().contains("\"<items>\""));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::MalformedResponse).unwrap();
        assert_eq!(json, "\"malformed_response\"");
    }
}
