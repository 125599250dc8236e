use serde::{Deserialize, Serialize};

use crate::core::Game;
use crate::error::{ErrorKind, RecommenderError};

/// Successful outcome: the selected games, possibly none
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub games: Vec<Game>,
}

impl SearchResponse {
    pub fn new(games: Vec<Game>) -> Self {
        Self { games }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Get display string for logging
    pub fn display(&self) -> String {
        let names: Vec<&str> = self.games.iter().map(|g| g.name.as_str()).collect();
        format!("{} game(s): [{}]", self.games.len(), names.join(", "))
    }
}

/// Failure envelope handed to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: ErrorKind,
}

impl From<&RecommenderError> for ErrorBody {
    fn from(err: &RecommenderError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_shape() {
        let json = serde_json::to_string(&SearchResponse::empty()).unwrap();
        assert_eq!(json, r#"{"games":[]}"#);
    }

    #[test]
    fn test_error_body_from_error() {
        let err = RecommenderError::ProviderTimeout {
            provider: "bgg".into(),
            attempts: 3,
        };
        let body = ErrorBody::from(&err);
        assert_eq!(body.kind, ErrorKind::ProviderTimeout);

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["kind"], "provider_timeout");
        assert!(value["error"].as_str().unwrap().contains("bgg"));
    }

    #[test]
    fn test_display() {
        let response = SearchResponse::new(vec![Game::new("1", "Azul"), Game::new("2", "Patchwork")]);
        assert_eq!(response.display(), "2 game(s): [Azul, Patchwork]");
    }
}
