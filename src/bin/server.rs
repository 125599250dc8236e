use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Json, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boardgame_recommender::core::{DEFAULT_LIMIT, DEFAULT_SAMPLE};
use boardgame_recommender::{
    EngineConfig, ErrorBody, ErrorKind, RecommendationEngine, RecommenderError, SearchRequest,
    SearchResponse,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<RecommendationEngine>,
}

/// Query string of `GET /api/search`
#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
    #[serde(default = "default_limit")]
    limit: usize,
    players: Option<u32>,
    max_time: Option<u32>,
    /// `0` returns every match
    #[serde(default = "default_sample")]
    sample: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_sample() -> usize {
    DEFAULT_SAMPLE
}

impl From<SearchParams> for SearchRequest {
    fn from(params: SearchParams) -> Self {
        SearchRequest {
            terms: params.q,
            limit: params.limit,
            desired_players: params.players,
            max_desired_time: params.max_time,
            sample: (params.sample > 0).then_some(params.sample),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    provider: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recommender_server=debug,boardgame_recommender=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = EngineConfig::from_env()?;
    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8090);

    tracing::info!("🚀 Starting board game recommender");
    tracing::info!("🎲 Provider: {}", config.provider);
    tracing::info!("🔌 Port: {}", port);

    let engine = RecommendationEngine::from_config(&config)?;
    let state = AppState {
        engine: Arc::new(engine),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/api/search", get(search_handler))
        .route("/v1/recommend", post(recommend_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("🎮 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: boardgame_recommender::VERSION.to_string(),
        provider: state.engine.provider_name().to_string(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Query(params) = params.map_err(|rejection| AppError::invalid(rejection.body_text()))?;
    run(&state, SearchRequest::from(params)).await
}

async fn recommend_handler(
    State(state): State<AppState>,
    request: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = request.map_err(|rejection| AppError::invalid(rejection.body_text()))?;
    run(&state, request).await
}

async fn run(state: &AppState, request: SearchRequest) -> Result<Json<SearchResponse>, AppError> {
    tracing::debug!("Search request: {:?}", request);

    let response = state.engine.recommend(&request).await?;

    tracing::info!("✅ '{}' → {}", request.terms, response.display());
    Ok(Json(response))
}

// Error handling
#[derive(Debug)]
struct AppError(RecommenderError);

impl AppError {
    fn invalid(message: String) -> Self {
        Self(RecommenderError::InvalidRequest(message))
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ProviderTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::MalformedResponse | ErrorKind::TransportError => StatusCode::BAD_GATEWAY,
        ErrorKind::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.kind());
        let body = ErrorBody::from(&self.0);

        if status.is_server_error() {
            tracing::error!("❌ Error: {} - {}", status, body.error);
        } else {
            tracing::warn!("⚠️ Rejected: {} - {}", status, body.error);
        }

        (status, Json(body)).into_response()
    }
}

impl From<RecommenderError> for AppError {
    fn from(err: RecommenderError) -> Self {
        Self(err)
    }
}
