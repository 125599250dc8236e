//! Item tree → canonical [`Game`].
//!
//! Everything here is provider-agnostic except player-count derivation,
//! which depends on whether the provider ships community poll data.

use crate::core::game::{
    DEFAULT_MAX_PLAYERS, DEFAULT_MIN_PLAYERS, DEFAULT_PLAYING_TIME, POLL_PLAYER_RANGE, UNTITLED,
};
use crate::core::{Game, PlayerSuggestions};
use crate::parser::{ItemNode, NameEntry, PollNode};

/// Characters kept from a description
pub const DESCRIPTION_CHARS: usize = 200;

/// Appended to every description
pub const ELLIPSIS: &str = "...";

/// Name of the poll carrying per-player-count votes
pub const SUGGESTED_PLAYERS_POLL: &str = "suggested_numplayers";

const BEST_LABEL: &str = "Best";
const RECOMMENDED_LABEL: &str = "Recommended";

/// How `playersBest` / `playersRecommended` are obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStrategy {
    /// Read the `suggested_numplayers` poll
    SuggestedNumPlayers,
    /// Provider has no poll data; both sets stay empty
    Unsupported,
}

impl PollStrategy {
    pub fn derive(&self, item: &ItemNode) -> PlayerSuggestions {
        match self {
            PollStrategy::SuggestedNumPlayers => item
                .poll(SUGGESTED_PLAYERS_POLL)
                .map(derive_player_suggestions)
                .unwrap_or_default(),
            PollStrategy::Unsupported => PlayerSuggestions::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    poll: PollStrategy,
}

impl Normalizer {
    pub fn new(poll: PollStrategy) -> Self {
        Self { poll }
    }

    /// Map one item node. Nodes without an id are not games and yield `None`.
    pub fn normalize(&self, item: &ItemNode) -> Option<Game> {
        let id = item.id.as_deref().map(str::trim).filter(|id| !id.is_empty())?;

        Some(Game {
            id: id.to_string(),
            name: select_name(&item.names),
            thumbnail: item
                .thumbnail
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            description: truncate_description(item.description.as_deref().unwrap_or_default()),
            min_players: parse_positive(item.min_players.as_deref(), DEFAULT_MIN_PLAYERS),
            max_players: parse_positive(item.max_players.as_deref(), DEFAULT_MAX_PLAYERS),
            playing_time: parse_positive(item.playing_time.as_deref(), DEFAULT_PLAYING_TIME),
            players: self.poll.derive(item),
        })
    }

    /// Map every node, dropping the ones without an id
    pub fn normalize_all(&self, items: &[ItemNode]) -> Vec<Game> {
        items
            .iter()
            .filter_map(|item| {
                let game = self.normalize(item);
                if game.is_none() {
                    tracing::warn!("Skipping item without id: {:?}", item.names.first());
                }
                game
            })
            .collect()
    }
}

/// Primary name, else the first one, else [`UNTITLED`]
pub fn select_name(names: &[NameEntry]) -> String {
    names
        .iter()
        .find(|n| n.primary)
        .or_else(|| names.first())
        .map(|n| n.value.clone())
        .unwrap_or_else(|| UNTITLED.to_string())
}

/// First [`DESCRIPTION_CHARS`] characters plus [`ELLIPSIS`], unconditionally
pub fn truncate_description(raw: &str) -> String {
    let mut out: String = raw.chars().take(DESCRIPTION_CHARS).collect();
    out.push_str(ELLIPSIS);
    out
}

/// Base-10 positive integer, or `default` when missing, non-numeric or zero
pub fn parse_positive(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|s| s.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

/// Classify each poll row into best / recommended / dropped
pub fn derive_player_suggestions(poll: &PollNode) -> PlayerSuggestions {
    let mut players = PlayerSuggestions::new();

    for row in &poll.results {
        let Some(label) = row.num_players.as_deref() else {
            continue;
        };
        if label.contains('+') {
            continue;
        }
        let Ok(count) = label.trim().parse::<u32>() else {
            continue;
        };
        if !POLL_PLAYER_RANGE.contains(&count) {
            continue;
        }

        let best = vote_count(row.votes_for(BEST_LABEL));
        let recommended = vote_count(row.votes_for(RECOMMENDED_LABEL));

        if best >= 1 && best >= recommended {
            players.add_best(count);
        } else if recommended >= 1 {
            players.add_recommended(count);
        }
    }

    players
}

fn vote_count(raw: Option<&str>) -> u64 {
    raw.and_then(|s| s.trim().parse().ok()).unwrap_or(0)
}
