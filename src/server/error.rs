//! Error types and response handling for the REST API.
//!
//! Maps errors to HTTP status codes and a JSON body of the form
//! `{ "error": { "type": ..., "message": ... } }`.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::domain::RepositoryError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Counter '{id}' not found")]
    NotFound { id: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { id } => ApiError::NotFound { id },
            other @ RepositoryError::EmptyTitle => ApiError::InvalidRequest(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl ApiError {
    /// Map error variant to appropriate HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Get error type string for JSON responses
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::InvalidRequest(_) => "invalid_request",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "error": {
                "type": self.error_type(),
                "message": self.to_string(),
            }
        });
        (self.status_code(), Json(body)).into_response()
    }
}
