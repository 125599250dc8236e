pub mod atlas;
pub mod bgg;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{EngineConfig, ProviderKind};
use crate::core::{Game, SearchRequest};
use crate::error::Result;
use crate::poller::Clock;
use crate::transport::HttpTransport;

pub use atlas::AtlasProvider;
pub use bgg::BggProvider;

/// Trait for board game catalogs (BoardGameGeek XML, Board Game Atlas JSON)
#[async_trait]
pub trait GameProvider: Send + Sync {
    /// Search the catalog and normalize every match.
    ///
    /// Either the complete list or an error; never a partial list.
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Game>>;

    /// Get game by ID
    async fn get_by_id(&self, id: &str) -> Result<Option<Game>>;

    /// Get provider name
    fn name(&self) -> &str;
}

/// Build the provider `config` selects. Transport and clock are shared
/// process-wide; the provider holds no per-request state.
pub fn build_provider(
    config: &EngineConfig,
    transport: Arc<dyn HttpTransport>,
    clock: Arc<dyn Clock>,
) -> Arc<dyn GameProvider> {
    match config.provider {
        ProviderKind::Bgg => Arc::new(BggProvider::from_config(config, transport, clock)),
        ProviderKind::Atlas => Arc::new(AtlasProvider::from_config(config, transport)),
    }
}
