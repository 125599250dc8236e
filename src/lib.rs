//! # Board Game Recommender
//!
//! Picks board games for tonight from free-text or category terms:
//! - BoardGameGeek XML provider with queued-search polling
//! - Board Game Atlas JSON provider
//! - One canonical [`Game`] record, including poll-derived best/recommended player counts
//! - Thumbnail, seat-count and playing-time filters with seeded random sampling
//! - Multiple interfaces: Rust library, HTTP API, CLI
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use boardgame_recommender::{EngineConfig, RecommendationEngine, SearchRequest};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = RecommendationEngine::from_config(&EngineConfig::from_env()?)?;
//!
//!     let request = SearchRequest::new("strategy card", 30).with_players(4).with_sample(3);
//!     let response = engine.recommend(&request).await?;
//!
//!     for game in &response.games {
//!         println!("{} - best with {:?}", game.name, game.players.best());
//!     }
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod normalizer;
pub mod parser;
pub mod poller;
pub mod providers;
pub mod selector;
pub mod transport;

// Re-export primary types
pub use crate::config::{EngineConfig, ProviderKind};
pub use crate::core::{ErrorBody, Game, PlayerSuggestions, SearchRequest, SearchResponse, Suggestion};
pub use crate::engine::RecommendationEngine;
pub use crate::error::{ErrorKind, RecommenderError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
