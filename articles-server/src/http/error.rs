//! API error types with IntoResponse
//!
//! Errors are converted to `{"message": ...}` JSON responses with the status
//! code for their kind.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::service::ArticleError;

/// API error type with automatic HTTP status mapping
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Service-level failure
    #[error(transparent)]
    Article(#[from] ArticleError),

    /// Request body could not be decoded (422)
    #[error("request body could not be decoded: {0}")]
    Decode(String),
}

impl ApiError {
    /// Status code this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Article(ArticleError::BadParamInput(_)) => StatusCode::BAD_REQUEST,
            Self::Article(ArticleError::Conflict(_)) => StatusCode::CONFLICT,
            Self::Article(ArticleError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Article(ArticleError::Internal(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Article(ArticleError::Internal(detail)) => {
                // Log the actual error, return generic message
                tracing::error!("Internal error: {}", detail);
                "Internal Server Error".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
