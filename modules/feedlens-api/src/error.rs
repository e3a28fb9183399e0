use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;

use feedlens_common::ErrorBody;
use hf_inference_client::HfError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No text provided")]
    EmptyText,

    #[error("Analysis failed: {0}")]
    Downstream(#[from] HfError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::EmptyText => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: "No text provided".to_string(),
                    details: None,
                },
            ),
            ApiError::Downstream(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: "Analysis failed".to_string(),
                    details: Some(err.details()),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
