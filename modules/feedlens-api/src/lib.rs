pub mod analysis;
pub mod error;
pub mod provider;
mod rest;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

pub use analysis::Analyzer;
pub use error::ApiError;
pub use provider::InferenceProvider;

pub struct AppState {
    pub analyzer: Analyzer,
}

impl AppState {
    pub fn new(provider: Arc<dyn InferenceProvider>) -> Self {
        Self {
            analyzer: Analyzer::new(provider),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        .route("/analyze", post(rest::api_analyze))
        .with_state(state)
        // CORS: the watcher calls in from arbitrary page origins
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Logging layer: method + path only, never the posted text
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
