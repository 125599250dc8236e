use std::sync::Arc;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::core::{Game, SearchRequest, SearchResponse};
use crate::error::Result;
use crate::poller::{Clock, TokioClock};
use crate::providers::{build_provider, GameProvider};
use crate::selector::{ResultSelector, SelectionCriteria};
use crate::transport::{HttpTransport, ReqwestTransport};

/// Recommendation pipeline: provider search, then filtering and sampling.
///
/// Built once per process and shared across requests. Each call runs its
/// own sequential pipeline with its own random source.
pub struct RecommendationEngine {
    provider: Arc<dyn GameProvider>,
    seed: Option<u64>,
}

impl RecommendationEngine {
    /// Engine backed by reqwest and the tokio clock
    pub fn from_config(config: &EngineConfig) -> Result<Self> {
        config.validate()?;
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(config.http_timeout())?);
        Ok(Self::with_transport(config, transport, Arc::new(TokioClock)))
    }

    /// Engine with explicit transport and clock
    pub fn with_transport(
        config: &EngineConfig,
        transport: Arc<dyn HttpTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let provider = build_provider(config, transport, clock);
        tracing::info!("Recommendation engine using provider '{}'", provider.name());
        Self::new(provider)
    }

    pub fn new(provider: Arc<dyn GameProvider>) -> Self {
        Self { provider, seed: None }
    }

    /// Fix the sampling seed so every request shuffles the same way
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Run the whole pipeline for one request
    pub async fn recommend(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let start = Instant::now();

        let games = self.provider.search(request).await?;
        let fetched = games.len();

        let criteria = SelectionCriteria::from(request);
        let selected = match self.seed {
            Some(seed) => ResultSelector::seeded(seed).select(games, &criteria),
            None => ResultSelector::from_entropy().select(games, &criteria),
        };

        let response = SearchResponse::new(selected);
        tracing::info!(
            "'{}' via {}: {} fetched, {} ({:.1}ms)",
            request.terms,
            self.provider.name(),
            fetched,
            response.display(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Ok(response)
    }

    /// Look up a single game without filtering
    pub async fn game(&self, id: &str) -> Result<Option<Game>> {
        self.provider.get_by_id(id).await
    }
}
