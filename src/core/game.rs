use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name used when the provider supplies no name entry at all
pub const UNTITLED: &str = "Untitled";

/// Default minimum player count
pub const DEFAULT_MIN_PLAYERS: u32 = 1;

/// Default maximum player count
pub const DEFAULT_MAX_PLAYERS: u32 = 4;

/// Default playing time in minutes
pub const DEFAULT_PLAYING_TIME: u32 = 30;

/// Player counts covered by the community poll
pub const POLL_PLAYER_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

/// How the community rated a player count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Suggestion {
    Best,
    Recommended,
    NotRecommended,
}

/// Player counts the poll marks as best or merely recommended.
///
/// A count lives in at most one of the two sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerSuggestions {
    players_best: BTreeSet<u32>,
    players_recommended: BTreeSet<u32>,
}

impl PlayerSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a count as best. Ignored when the count is already classified.
    pub fn add_best(&mut self, count: u32) -> bool {
        if self.contains(count) {
            return false;
        }
        self.players_best.insert(count)
    }

    /// Record a count as recommended. Ignored when the count is already classified.
    pub fn add_recommended(&mut self, count: u32) -> bool {
        if self.contains(count) {
            return false;
        }
        self.players_recommended.insert(count)
    }

    pub fn contains(&self, count: u32) -> bool {
        self.players_best.contains(&count) || self.players_recommended.contains(&count)
    }

    pub fn best(&self) -> &BTreeSet<u32> {
        &self.players_best
    }

    pub fn recommended(&self) -> &BTreeSet<u32> {
        &self.players_recommended
    }

    pub fn is_empty(&self) -> bool {
        self.players_best.is_empty() && self.players_recommended.is_empty()
    }

    pub fn suggestion_for(&self, count: u32) -> Suggestion {
        if self.players_best.contains(&count) {
            Suggestion::Best
        } else if self.players_recommended.contains(&count) {
            Suggestion::Recommended
        } else {
            Suggestion::NotRecommended
        }
    }
}

/// Canonical, provider-independent board game record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Provider-assigned identifier
    pub id: String,

    pub name: String,

    /// Image URL, empty when the provider has none
    #[serde(default)]
    pub thumbnail: String,

    /// Truncated description with a trailing ellipsis
    #[serde(default)]
    pub description: String,

    pub min_players: u32,

    pub max_players: u32,

    /// Minutes
    pub playing_time: u32,

    #[serde(flatten)]
    pub players: PlayerSuggestions,
}

impl Game {
    /// Create a game with default player counts and playing time
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            thumbnail: String::new(),
            description: String::new(),
            min_players: DEFAULT_MIN_PLAYERS,
            max_players: DEFAULT_MAX_PLAYERS,
            playing_time: DEFAULT_PLAYING_TIME,
            players: PlayerSuggestions::default(),
        }
    }

    pub fn has_thumbnail(&self) -> bool {
        !self.thumbnail.trim().is_empty()
    }

    /// Whether `players` people can sit at this game
    pub fn seats(&self, players: u32) -> bool {
        self.min_players <= players && players <= self.max_players
    }
}
