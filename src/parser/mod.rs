//! Raw payload → provider-neutral item tree.
//!
//! Parsers keep every value as the provider's text. Turning text into
//! numbers, picking names and applying defaults is the normalizer's job.

pub mod json;
pub mod xml;

use crate::error::Result;

pub use json::JsonParser;
pub use xml::XmlParser;

/// One localized or alternate name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub value: String,
    pub primary: bool,
}

impl NameEntry {
    pub fn new(value: impl Into<String>, primary: bool) -> Self {
        Self {
            value: value.into(),
            primary,
        }
    }
}

/// Vote tally for one label ("Best", "Recommended", "Not Recommended")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollVote {
    pub value: String,
    pub num_votes: Option<String>,
}

/// Votes for one candidate player count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollRow {
    pub num_players: Option<String>,
    pub votes: Vec<PollVote>,
}

impl PollRow {
    /// Raw vote count for `label`
    pub fn votes_for(&self, label: &str) -> Option<&str> {
        self.votes
            .iter()
            .find(|v| v.value == label)
            .and_then(|v| v.num_votes.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollNode {
    pub name: String,
    pub results: Vec<PollRow>,
}

/// A single catalog entry as the provider described it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemNode {
    pub id: Option<String>,
    pub names: Vec<NameEntry>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub min_players: Option<String>,
    pub max_players: Option<String>,
    pub playing_time: Option<String>,
    pub polls: Vec<PollNode>,
}

impl ItemNode {
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn poll(&self, name: &str) -> Option<&PollNode> {
        self.polls.iter().find(|p| p.name == name)
    }
}

/// Capability: turn a provider payload into item nodes.
///
/// An empty document or one without the collection yields no items;
/// only unparsable input is an error (`MalformedResponse`).
pub trait ResponseParser: Send + Sync {
    fn provider(&self) -> &str;

    fn parse(&self, payload: &str) -> Result<Vec<ItemNode>>;

    /// IDs of the parsed items, in document order
    fn parse_ids(&self, payload: &str) -> Result<Vec<String>> {
        Ok(self
            .parse(payload)?
            .into_iter()
            .filter_map(|item| item.id)
            .filter(|id| !id.trim().is_empty())
            .collect())
    }
}
