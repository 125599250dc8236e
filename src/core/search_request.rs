use serde::{Deserialize, Serialize};

/// Terms used when the caller sends nothing to search for
pub const DEFAULT_TERMS: &str = "boardgame";

/// Number of IDs requested when the caller does not say
pub const DEFAULT_LIMIT: usize = 10;

/// Games picked per request when the caller does not say
pub const DEFAULT_SAMPLE: usize = 3;

/// One recommendation request, created fresh per call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text or category terms, space separated
    #[serde(default)]
    pub terms: String,

    /// How many catalog entries to fetch before filtering
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Number of people who want to play
    #[serde(default)]
    pub desired_players: Option<u32>,

    /// Longest acceptable playing time in minutes
    #[serde(default)]
    pub max_desired_time: Option<u32>,

    /// Size of the random subset to return; all matches when `None`.
    /// Deserialized requests that omit it get [`DEFAULT_SAMPLE`].
    #[serde(default = "default_sample")]
    pub sample: Option<usize>,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_sample() -> Option<usize> {
    Some(DEFAULT_SAMPLE)
}

impl SearchRequest {
    pub fn new(terms: impl Into<String>, limit: usize) -> Self {
        Self {
            terms: terms.into(),
            limit,
            desired_players: None,
            max_desired_time: None,
            sample: None,
        }
    }

    pub fn with_players(mut self, players: u32) -> Self {
        self.desired_players = Some(players);
        self
    }

    pub fn with_max_time(mut self, minutes: u32) -> Self {
        self.max_desired_time = Some(minutes);
        self
    }

    pub fn with_sample(mut self, size: usize) -> Self {
        self.sample = Some(size);
        self
    }

    /// Trimmed terms, or `fallback` when they are blank
    pub fn query_terms<'a>(&'a self, fallback: &'a str) -> &'a str {
        let trimmed = self.terms.trim();
        if trimmed.is_empty() {
            fallback
        } else {
            trimmed
        }
    }

    /// Limit clamped to `1..=max`
    pub fn bounded_limit(&self, max: usize) -> usize {
        self.limit.clamp(1, max.max(1))
    }
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self::new(DEFAULT_TERMS, DEFAULT_LIMIT)
    }
}
