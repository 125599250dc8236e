use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::core::search_request::DEFAULT_TERMS;
use crate::error::{RecommenderError, Result};

/// Which catalog answers search requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// XML community database with asynchronous search jobs and player polls
    Bgg,
    /// JSON catalog API, single call, no poll data
    Atlas,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Bgg => "bgg",
            ProviderKind::Atlas => "atlas",
        }
    }
}

impl FromStr for ProviderKind {
    type Err = RecommenderError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bgg" | "boardgamegeek" => Ok(ProviderKind::Bgg),
            "atlas" | "boardgameatlas" => Ok(ProviderKind::Atlas),
            other => Err(RecommenderError::Config(format!("unknown provider '{}'", other))),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Engine configuration, built once per process
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub provider: ProviderKind,
    pub bgg_base_url: String,
    pub atlas_base_url: String,
    pub atlas_client_id: String,
    pub http_timeout_secs: u64,
    pub poll_max_attempts: u32,
    pub poll_backoff_ms: u64,
    pub search_limit_max: usize,
    pub default_terms: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Bgg,
            bgg_base_url: "https://boardgamegeek.com/xmlapi2".to_string(),
            atlas_base_url: "https://api.boardgameatlas.com/api".to_string(),
            atlas_client_id: "JLBr5npPhV".to_string(),
            http_timeout_secs: 10,
            poll_max_attempts: 3,
            poll_backoff_ms: 2000,
            search_limit_max: 30,
            default_terms: DEFAULT_TERMS.to_string(),
        }
    }
}

impl EngineConfig {
    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(provider) = lookup("RECOMMENDER_PROVIDER") {
            config.provider = provider.parse()?;
        }
        if let Some(url) = lookup("BGG_BASE_URL") {
            config.bgg_base_url = url;
        }
        if let Some(url) = lookup("ATLAS_BASE_URL") {
            config.atlas_base_url = url;
        }
        if let Some(id) = lookup("ATLAS_CLIENT_ID") {
            config.atlas_client_id = id;
        }
        if let Some(terms) = lookup("DEFAULT_TERMS") {
            config.default_terms = terms;
        }
        config.http_timeout_secs = parse_var(&lookup, "HTTP_TIMEOUT_SECS", config.http_timeout_secs)?;
        config.poll_max_attempts = parse_var(&lookup, "POLL_MAX_ATTEMPTS", config.poll_max_attempts)?;
        config.poll_backoff_ms = parse_var(&lookup, "POLL_BACKOFF_MS", config.poll_backoff_ms)?;
        config.search_limit_max = parse_var(&lookup, "SEARCH_LIMIT_MAX", config.search_limit_max)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_max_attempts == 0 {
            return Err(RecommenderError::Config("poll_max_attempts must be at least 1".into()));
        }
        if self.search_limit_max == 0 {
            return Err(RecommenderError::Config("search_limit_max must be at least 1".into()));
        }
        if self.default_terms.trim().is_empty() {
            return Err(RecommenderError::Config("default_terms must not be empty".into()));
        }
        if self.http_timeout_secs == 0 {
            return Err(RecommenderError::Config("http_timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn poll_backoff(&self) -> Duration {
        Duration::from_millis(self.poll_backoff_ms)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| RecommenderError::Config(format!("{} has invalid value '{}'", key, raw))),
        None => Ok(default),
    }
}
