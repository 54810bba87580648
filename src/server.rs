//! HTTP API over the scraping and recommendation core.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/health` | Health check (returns version) |
//! | `GET`  | `/search?query=…&sites=a,b` | Scrape the named sites |
//! | `POST` | `/personalize` | Filtered body-shape recommendations |
//! | `GET`  | `/recommend/{user_id}?top_n=…` | Collaborative recommendations |
//!
//! # Error Contract
//!
//! Error responses carry a flat payload:
//!
//! ```json
//! { "error": "No recommendations available for body shape: 'Oval'" }
//! ```
//!
//! `/personalize` maps filter faults onto status codes: incomplete profile
//! → 400, unknown body shape → 404, missing/corrupt catalog → 500.
//! `/recommend` always answers 200; an empty list is a valid result.
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted to support browser
//! clients.

use axum::{
    extract::{Path as AxumPath, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::interactions::{InteractionStore, SqliteStore};
use crate::models::{ProductRecord, StyleGuide};
use crate::orchestrator::ScrapeOrchestrator;
use crate::recommend::{personalize, RecommendError, Recommendations};
use crate::similar;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
struct AppState {
    orchestrator: Arc<ScrapeOrchestrator>,
    catalog: Arc<Catalog>,
    store: Arc<dyn InteractionStore>,
    default_top_n: usize,
}

/// Start the HTTP server on `[server].bind`.
///
/// Loads the catalog and opens the interaction store up front; a missing
/// or corrupt catalog fails startup rather than every later request.
/// Runs until the process is terminated.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let orchestrator = Arc::new(ScrapeOrchestrator::from_config(&config.scrape)?);
    let catalog = Arc::new(Catalog::load(&config.catalog.path)?);

    let store = SqliteStore::connect(&config.db.path).await?;
    store.migrate().await?;

    let state = AppState {
        orchestrator,
        catalog,
        store: Arc::new(store),
        default_top_n: config.recommend.top_n,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/search", get(handle_search))
        .route("/personalize", post(handle_personalize))
        .route("/recommend/{user_id}", get(handle_recommend))
        .layer(cors)
        .with_state(state);

    let bind_addr = &config.server.bind;
    println!("lookcircuit server listening on http://{bind_addr}");

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

/// Internal error type that renders the flat `{"error": "..."}` payload.
struct AppError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        message: message.into(),
    }
}

fn internal(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: message.into(),
    }
}

impl From<RecommendError> for AppError {
    fn from(err: RecommendError) -> Self {
        let status = match err {
            RecommendError::IncompleteProfile => StatusCode::BAD_REQUEST,
            RecommendError::UnknownBodyShape(_) => StatusCode::NOT_FOUND,
            RecommendError::DataUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        AppError {
            status,
            message: err.to_string(),
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET /search ============

#[derive(Deserialize)]
struct SearchParams {
    query: String,
    /// Comma-separated site ids; defaults to the configured site list.
    sites: Option<String>,
}

#[derive(Serialize)]
struct SearchResponse {
    query: String,
    products: Vec<ProductRecord>,
}

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.query.trim().to_string();
    if query.is_empty() {
        return Err(bad_request("query must not be empty"));
    }

    let sites: Vec<String> = match &params.sites {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        None => state.orchestrator.default_sites().to_vec(),
    };

    let products = state
        .orchestrator
        .search(&query, &sites)
        .await
        .map_err(|e| bad_request(e.to_string()))?;

    Ok(Json(SearchResponse { query, products }))
}

// ============ POST /personalize ============

#[derive(Deserialize)]
struct PersonalizeRequest {
    #[serde(default)]
    body_shape: String,
    #[serde(default)]
    style_guide: StyleGuide,
}

async fn handle_personalize(
    State(state): State<AppState>,
    Json(req): Json<PersonalizeRequest>,
) -> Result<Json<Recommendations>, AppError> {
    let out = personalize(&state.catalog, &req.body_shape, &req.style_guide)?;
    Ok(Json(out))
}

// ============ GET /recommend/{user_id} ============

#[derive(Deserialize)]
struct RecommendParams {
    top_n: Option<usize>,
}

#[derive(Serialize)]
struct RecommendResponse {
    items: Vec<i64>,
}

async fn handle_recommend(
    State(state): State<AppState>,
    AxumPath(user_id): AxumPath<i64>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>, AppError> {
    let saves = state
        .store
        .saves()
        .await
        .map_err(|e| internal(e.to_string()))?;
    let top_n = params.top_n.unwrap_or(state.default_top_n);
    let items = similar::recommend(&saves, user_id, top_n);
    Ok(Json(RecommendResponse { items }))
}
