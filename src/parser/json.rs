use serde::Deserialize;

use crate::error::{RecommenderError, Result};
use crate::parser::{ItemNode, NameEntry, ResponseParser};

/// Parser for `{ "games": [ { ... } ] }` catalog responses
#[derive(Debug, Clone)]
pub struct JsonParser {
    provider: String,
}

impl JsonParser {
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
        }
    }
}

/// `games` may be missing or `null`; both mean no results
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default, alias = "items")]
    games: Option<Vec<JsonGame>>,
}

/// Scalars arrive as strings or numbers depending on the endpoint
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(i) => i.to_string(),
            // 45.5 minutes reads as 45
            Scalar::Float(f) => (f.trunc() as i64).to_string(),
            Scalar::Bool(b) => b.to_string(),
            Scalar::String(s) => s,
        }
    }
}

/// Field spellings seen across catalog endpoints. Several image and
/// description keys can appear together, so they stay separate fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonGame {
    #[serde(default)]
    id: Option<Scalar>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
    #[serde(default, rename = "thumb_url")]
    thumb_url: Option<String>,
    #[serde(default, rename = "image_url")]
    image_url: Option<String>,
    #[serde(default, rename = "description_preview", alias = "descriptionPreview")]
    description_preview: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, alias = "min_players", alias = "minplayers")]
    min_players: Option<Scalar>,
    #[serde(default, alias = "max_players", alias = "maxplayers")]
    max_players: Option<Scalar>,
    #[serde(default, rename = "playtime", alias = "playingTime", alias = "playing_time")]
    playtime: Option<Scalar>,
}

/// First value that is present and not blank
fn first_text(candidates: [Option<String>; 3]) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

impl From<JsonGame> for ItemNode {
    fn from(game: JsonGame) -> Self {
        ItemNode {
            id: game.id.map(Scalar::into_text),
            names: game
                .name
                .into_iter()
                .map(|name| NameEntry::new(name, true))
                .collect(),
            description: first_text([game.description_preview, game.description, None]),
            thumbnail: first_text([game.thumbnail, game.thumb_url, game.image_url]),
            min_players: game.min_players.map(Scalar::into_text),
            max_players: game.max_players.map(Scalar::into_text),
            playing_time: game.playtime.map(Scalar::into_text),
            polls: Vec::new(),
        }
    }
}

impl ResponseParser for JsonParser {
    fn provider(&self) -> &str {
        &self.provider
    }

    fn parse(&self, payload: &str) -> Result<Vec<ItemNode>> {
        let envelope: Envelope = serde_json::from_str(payload)
            .map_err(|e| RecommenderError::malformed(&self.provider, e, payload))?;

        let games = envelope.games.unwrap_or_default();
        tracing::debug!("[{}] parsed {} game object(s)", self.provider, games.len());
        Ok(games.into_iter().map(ItemNode::from).collect())
    }
}
