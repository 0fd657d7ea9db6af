//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{models::SchemaError, repositories::USERS_EMAIL_KEY};

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or invalid bearer credential
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated, but not allowed to act on the resource
    #[error("Forbidden")]
    Forbidden,

    /// Identifier does not resolve to a record
    #[error("{0}")]
    NotFound(String),

    /// Payload failed schema validation
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A unique index rejected the write
    #[error("{0}")]
    Conflict(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(DatabaseError),
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(constraint) => {
                let message = match constraint.as_str() {
                    USERS_EMAIL_KEY => "Email already exists".to_string(),
                    other => format!("Duplicate value violates {}", other),
                };
                ApiError::Conflict(message)
            }
            other => ApiError::Database(other),
        }
    }
}

/// Unreadable or mistyped bodies are validation failures like any other.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Schema(SchemaError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Schema(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Database(err) => {
                error!("Database operation failed: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
