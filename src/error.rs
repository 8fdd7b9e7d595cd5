//! Error types for the dentamap API
//!
//! Every handler returns `ApiResult<T>`; the `IntoResponse` impl maps the
//! taxonomy onto HTTP statuses. 5xx responses carry the underlying error
//! message in the body, matching the behavior of the original service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// A single missing or invalid field reported by record validation
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// Field name as it appears on the wire (camelCase)
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400) - e.g. malformed record identifier
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Record validation failure (400) with a structured field list
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Missing or rejected bearer token (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Valid token, but the caller is not the configured admin (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Database operation error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic error (500)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            // Validation carries the structured field list alongside the message
            ApiError::Validation(fields) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": {
                        "code": "VALIDATION_ERROR",
                        "message": "One or more fields are missing or invalid",
                        "fields": fields,
                    }
                }),
            ),
            ApiError::NotFound(msg) => error_body(StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => error_body(StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::Unauthorized(msg) => {
                error_body(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg)
            }
            ApiError::Forbidden(msg) => error_body(StatusCode::FORBIDDEN, "FORBIDDEN", msg),
            ApiError::Database(err) => error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
            ApiError::Other(err) => error_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                err.to_string(),
            ),
        };

        (status, Json(body)).into_response()
    }
}

fn error_body(
    status: StatusCode,
    code: &str,
    message: String,
) -> (StatusCode, serde_json::Value) {
    (
        status,
        json!({
            "error": {
                "code": code,
                "message": message,
            }
        }),
    )
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
