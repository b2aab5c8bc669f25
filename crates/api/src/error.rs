//! API error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use serde::Serialize;
use thiserror::Error;

/// Errors a handler can return
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Rejection(#[from] JsonRejection),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error("metrics exporter is disabled")]
    MetricsDisabled,
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub details: Vec<String>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Rejection(rejection) => rejection.status(),
            ApiError::Inference(e) if e.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MetricsDisabled => StatusCode::NOT_FOUND,
        }
    }

    fn details(&self) -> Vec<String> {
        match self {
            ApiError::Rejection(rejection) => vec![rejection.body_text()],
            ApiError::Inference(InferenceError::InvalidInput(errors)) => {
                errors.iter().map(ToString::to_string).collect()
            }
            other => vec![other.to_string()],
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: status
                .canonical_reason()
                .unwrap_or("error")
                .to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}
