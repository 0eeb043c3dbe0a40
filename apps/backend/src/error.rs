//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use question_core::ExportError;
use serde::Serialize;
use thiserror::Error;

use crate::services::extract::ExtractError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not read document: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Export failed: {0}")]
    Export(#[from] ExportError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::Extraction(_) => (StatusCode::UNPROCESSABLE_ENTITY, "extraction_error"),
            ApiError::Export(ExportError::EmptyQuestionList)
            | ApiError::Export(ExportError::InvalidQuestion { .. }) => {
                (StatusCode::BAD_REQUEST, "export_precondition")
            }
            ApiError::Export(_) => (StatusCode::INTERNAL_SERVER_ERROR, "export_error"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
