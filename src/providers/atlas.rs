use async_trait::async_trait;
use std::sync::Arc;

use crate::client::ProviderClient;
use crate::config::EngineConfig;
use crate::core::{Game, SearchRequest};
use crate::error::Result;
use crate::normalizer::{Normalizer, PollStrategy};
use crate::parser::{JsonParser, ResponseParser};
use crate::providers::GameProvider;
use crate::transport::HttpTransport;

/// Board Game Atlas JSON provider: one search call returns full records
pub struct AtlasProvider {
    client: ProviderClient,
    parser: JsonParser,
    normalizer: Normalizer,
    client_id: String,
    limit_max: usize,
    default_terms: String,
}

impl AtlasProvider {
    pub const NAME: &'static str = "atlas";

    pub fn new(
        client: ProviderClient,
        client_id: impl Into<String>,
        limit_max: usize,
        default_terms: impl Into<String>,
    ) -> Self {
        Self {
            parser: JsonParser::new(client.provider()),
            client,
            normalizer: Normalizer::new(PollStrategy::Unsupported),
            client_id: client_id.into(),
            limit_max,
            default_terms: default_terms.into(),
        }
    }

    pub fn from_config(config: &EngineConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let client = ProviderClient::new(Self::NAME, &config.atlas_base_url, transport);
        Self::new(
            client,
            &config.atlas_client_id,
            config.search_limit_max,
            &config.default_terms,
        )
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<Vec<Game>> {
        let mut all = vec![("client_id", self.client_id.as_str())];
        all.extend_from_slice(params);

        let url = self.client.url("search", &all);
        let body = self.client.fetch_ok(&url).await?;

        let items = self.parser.parse(&body)?;
        Ok(self.normalizer.normalize_all(&items))
    }
}

#[async_trait]
impl GameProvider for AtlasProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Game>> {
        let terms = request.query_terms(&self.default_terms);
        let limit = request.bounded_limit(self.limit_max).to_string();

        let games = self.query(&[("name", terms), ("limit", limit.as_str())]).await?;
        tracing::info!("[{}] '{}' → {} game(s)", Self::NAME, terms, games.len());
        Ok(games)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Game>> {
        let games = self.query(&[("ids", id)]).await?;
        Ok(games.into_iter().find(|g| g.id == id))
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
