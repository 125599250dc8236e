use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use std::time::Duration;

use boardgame_recommender::normalizer::{Normalizer, PollStrategy};
use boardgame_recommender::parser::{ResponseParser, XmlParser};
use boardgame_recommender::poller::Clock;
use boardgame_recommender::transport::{HttpTransport, RawResponse};
use boardgame_recommender::{EngineConfig, RecommendationEngine, Result, SearchRequest};

fn thing_document(count: usize) -> String {
    let items: String = (0..count)
        .map(|i| {
            format!(
                r#"<item type="boardgame" id="{i}">
  <thumbnail>https://cf.geekdo-images.com/{i}_t.jpg</thumbnail>
  <name type="alternate" sortindex="1" value="Alt {i}"/>
  <name type="primary" sortindex="1" value="Game {i}"/>
  <description>{desc}</description>
  <minplayers value="2"/><maxplayers value="5"/><playingtime value="60"/>
  <poll name="suggested_numplayers" totalvotes="40">
    <results numplayers="2"><result value="Best" numvotes="1"/><result value="Recommended" numvotes="9"/></results>
    <results numplayers="3"><result value="Best" numvotes="12"/><result value="Recommended" numvotes="4"/></results>
    <results numplayers="4"><result value="Best" numvotes="6"/><result value="Recommended" numvotes="6"/></results>
    <results numplayers="5"><result value="Best" numvotes="0"/><result value="Recommended" numvotes="2"/></results>
    <results numplayers="5+"><result value="Best" numvotes="0"/><result value="Recommended" numvotes="0"/></results>
  </poll>
</item>"#,
                desc = "Lorem ipsum dolor sit amet &amp; more. ".repeat(20)
            )
        })
        .collect();
    format!("<items>{items}</items>")
}

fn bench_parse_and_normalize(c: &mut Criterion) {
    let parser = XmlParser::new("bgg");
    let normalizer = Normalizer::new(PollStrategy::SuggestedNumPlayers);
    let doc_10 = thing_document(10);
    let doc_30 = thing_document(30);

    c.bench_function("xml_parse_10", |b| {
        b.iter(|| black_box(parser.parse(&doc_10).unwrap()));
    });

    c.bench_function("parse_normalize_30", |b| {
        b.iter(|| {
            let items = parser.parse(&doc_30).unwrap();
            black_box(normalizer.normalize_all(&items))
        });
    });
}

struct Canned {
    search: String,
    thing: String,
}

#[async_trait]
impl HttpTransport for Canned {
    async fn get(&self, url: &str) -> Result<RawResponse> {
        let body = if url.contains("/search") { &self.search } else { &self.thing };
        Ok(RawResponse::ok(body.clone()))
    }
}

struct NoSleep;

#[async_trait]
impl Clock for NoSleep {
    async fn sleep(&self, _duration: Duration) {}
}

fn bench_full_pipeline(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let thing = thing_document(30);
    let transport = Arc::new(Canned {
        search: thing.clone(),
        thing,
    });
    let engine = RecommendationEngine::with_transport(&EngineConfig::default(), transport, Arc::new(NoSleep));
    let request = SearchRequest::new("strategy", 30).with_players(4).with_sample(3);

    c.bench_function("recommend_30_sample_3", |b| {
        b.to_async(&runtime).iter(|| async {
            black_box(engine.recommend(&request).await.unwrap())
        });
    });
}

criterion_group!(benches, bench_parse_and_normalize, bench_full_pipeline);
criterion_main!(benches);
