use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Json},
};
use tracing::{debug, error, info, warn};

use feedlens_common::{AnalyzeRequest, AnalyzeResponse};

use crate::error::ApiError;
use crate::AppState;

// --- Handlers ---

/// `POST /analyze`. A body that is not JSON, or has no `text`, is treated
/// as empty text.
pub async fn api_analyze(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> impl IntoResponse {
    let text = match body {
        Ok(Json(req)) => req.text.unwrap_or_default(),
        Err(rejection) => {
            debug!(error = %rejection, "Unreadable /analyze body");
            String::new()
        }
    };

    info!(chars = text.chars().count(), "Incoming /analyze request");
    debug!(%text, "Received text");

    match state.analyzer.analyze(&text).await {
        Ok(result) => {
            info!(emotion = %result.emotion, topics = ?result.topics, "Analysis complete");
            Json(AnalyzeResponse::from(result)).into_response()
        }
        Err(e @ ApiError::EmptyText) => {
            warn!("No text provided");
            e.into_response()
        }
        Err(e @ ApiError::Downstream(_)) => {
            error!(error = %e, "Error analyzing text");
            e.into_response()
        }
    }
}
