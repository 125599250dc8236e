use async_trait::async_trait;
use std::sync::Arc;

use crate::client::ProviderClient;
use crate::config::EngineConfig;
use crate::core::{Game, SearchRequest};
use crate::error::Result;
use crate::normalizer::{Normalizer, PollStrategy};
use crate::parser::{ResponseParser, XmlParser};
use crate::poller::{Clock, JobPoller, PollPolicy};
use crate::providers::GameProvider;
use crate::transport::HttpTransport;

/// BoardGameGeek XML API v2 provider.
///
/// Search runs as a queued job on the provider side and is polled; the
/// detail calls then fetch the IDs in `thing` batches with stats.
pub struct BggProvider {
    client: ProviderClient,
    poller: JobPoller,
    parser: XmlParser,
    normalizer: Normalizer,
    limit_max: usize,
    default_terms: String,
}

impl BggProvider {
    pub const NAME: &'static str = "bgg";

    /// Most IDs the `thing` endpoint accepts per request
    pub const THING_BATCH: usize = 20;

    pub fn new(client: ProviderClient, poller: JobPoller, limit_max: usize, default_terms: impl Into<String>) -> Self {
        Self {
            parser: XmlParser::new(client.provider()),
            client,
            poller,
            normalizer: Normalizer::new(PollStrategy::SuggestedNumPlayers),
            limit_max,
            default_terms: default_terms.into(),
        }
    }

    pub fn from_config(config: &EngineConfig, transport: Arc<dyn HttpTransport>, clock: Arc<dyn Clock>) -> Self {
        let client = ProviderClient::new(Self::NAME, &config.bgg_base_url, transport);
        let policy = PollPolicy {
            max_attempts: config.poll_max_attempts,
            backoff: config.poll_backoff(),
            ..PollPolicy::default()
        };
        Self::new(
            client,
            JobPoller::new(policy, clock),
            config.search_limit_max,
            &config.default_terms,
        )
    }

    /// IDs matching `terms`, at most `limit`, in provider order
    pub async fn search_ids(&self, terms: &str, limit: usize) -> Result<Vec<String>> {
        let url = self
            .client
            .url("search", &[("query", terms), ("type", "boardgame")]);

        let response = self.poller.run(&self.client, &url).await?;
        let body = self.client.ensure_success(response)?;

        let mut ids = self.parser.parse_ids(&body)?;
        ids.truncate(limit);
        Ok(ids)
    }

    /// Normalized games for `ids`, in provider order
    pub async fn fetch_details(&self, ids: &[String]) -> Result<Vec<Game>> {
        let mut games = Vec::with_capacity(ids.len());
        for batch in ids.chunks(Self::THING_BATCH) {
            games.extend(self.fetch_batch(batch).await?);
        }
        Ok(games)
    }

    async fn fetch_batch(&self, ids: &[String]) -> Result<Vec<Game>> {
        let joined: Vec<String> = ids
            .iter()
            .map(|id| urlencoding::encode(id).into_owned())
            .collect();
        let mut url = self.client.url("thing", &[("stats", "1")]);
        url.push_str("&id=");
        url.push_str(&joined.join(","));
        let body = self.client.fetch_ok(&url).await?;

        let items = self.parser.parse(&body)?;
        Ok(self.normalizer.normalize_all(&items))
    }
}

#[async_trait]
impl GameProvider for BggProvider {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<Game>> {
        let terms = request.query_terms(&self.default_terms);
        let limit = request.bounded_limit(self.limit_max);

        let ids = self.search_ids(terms, limit).await?;
        if ids.is_empty() {
            tracing::info!("[{}] no matches for '{}'", Self::NAME, terms);
            return Ok(Vec::new());
        }
        tracing::debug!("[{}] '{}' matched ids {:?}", Self::NAME, terms, ids);

        let games = self.fetch_details(&ids).await?;
        tracing::info!(
            "[{}] '{}' → {} id(s), {} game(s) normalized",
            Self::NAME,
            terms,
            ids.len(),
            games.len()
        );
        Ok(games)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Game>> {
        let games = self.fetch_details(&[id.to_string()]).await?;
        Ok(games.into_iter().find(|g| g.id == id))
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, RecommenderError};
    use crate::transport::RawResponse;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    struct Scripted {
        responses: Mutex<VecDeque<RawResponse>>,
        urls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl HttpTransport for Scripted {
        async fn get(&self, url: &str) -> Result<RawResponse> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| RawResponse::new(500, "script exhausted")))
        }
    }

    struct NoSleep;

    #[async_trait]
    impl Clock for NoSleep {
        async fn sleep(&self, _duration: Duration) {}
    }

    fn provider(responses: Vec<RawResponse>) -> (Arc<Scripted>, BggProvider) {
        let transport = Arc::new(Scripted {
            responses: Mutex::new(responses.into()),
            urls: Mutex::new(Vec::new()),
        });
        let config = EngineConfig {
            bgg_base_url: "https://bgg.test/xmlapi2".into(),
            ..EngineConfig::default()
        };
        let provider = BggProvider::from_config(&config, transport.clone(), Arc::new(NoSleep));
        (transport, provider)
    }

    const SEARCH: &str = r#"<items total="3">
        <item type="boardgame" id="1"/><item type="boardgame" id="2"/><item type="boardgame" id="3"/>
    </items>"#;

    const THING: &str = r#"<items>
        <item type="boardgame" id="1">
            <thumbnail>https://img/1.jpg</thumbnail>
            <name type="primary" value="One"/>
        </item>
        <item type="boardgame" id="2">
            <name type="primary" value="Two"/>
        </item>
    </items>"#;

    #[tokio::test]
    async fn test_search_then_detail_urls() {
        let (transport, provider) = provider(vec![
            RawResponse::new(202, ""),
            RawResponse::ok(SEARCH),
            RawResponse::ok(THING),
        ]);

        let games = provider.search(&SearchRequest::new("", 2)).await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].name, "One");

        let urls = transport.urls.lock().unwrap();
        assert_eq!(urls.len(), 3);
        assert_eq!(urls[0], "https://bgg.test/xmlapi2/search?query=boardgame&type=boardgame");
        assert_eq!(urls[1], urls[0]);
        assert_eq!(urls[2], "https://bgg.test/xmlapi2/thing?stats=1&id=1,2");
    }

    #[tokio::test]
    async fn test_search_http_error_is_transport() {
        let (_, provider) = provider(vec![RawResponse::new(503, "down")]);
        let err = provider.search(&SearchRequest::new("abc", 5)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportError);
    }

    #[tokio::test]
    async fn test_detail_http_error_is_transport() {
        let (transport, provider) = provider(vec![
            RawResponse::ok(SEARCH),
            RawResponse::new(500, "thing unavailable"),
        ]);
        let err = provider.search(&SearchRequest::new("abc", 5)).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TransportError);
        match err {
            RecommenderError::Transport { status, .. } => assert_eq!(status, Some(500)),
            other => panic!("unexpected error: {other:?}"),
        }
        // No retry on the detail call
        assert_eq!(transport.urls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_details_batched_by_twenty() {
        let ids: Vec<String> = (1..=25).map(|i| i.to_string()).collect();
        let (transport, provider) = provider(vec![RawResponse::ok(THING), RawResponse::ok("<items/>")]);

        let games = provider.fetch_details(&ids).await.unwrap();
        assert_eq!(games.len(), 2);

        let urls = transport.urls.lock().unwrap();
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0].rsplit("id=").next().unwrap().split(',').count(), 20);
        assert!(urls[1].ends_with("id=21,22,23,24,25"));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (_, provider) = provider(vec![RawResponse::ok(THING)]);
        let game = provider.get_by_id("2").await.unwrap().unwrap();
        assert_eq!(game.name, "Two");
    }
}
