//! Application error type mapping to HTTP status codes.
//!
//! All error responses share one wire shape: `{"error": "..."}`. Internal
//! failures are logged with detail and returned generically; nothing in
//! this module retries.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use postcal_types::error::{PostError, PreferencesError, RepositoryError, ScheduleError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request fields.
    InvalidInput(String),
    /// Referenced post/assignment/user absent.
    NotFound(String),
    /// Store not reachable.
    NotReady,
    /// Unexpected store/query failure.
    Internal(String),
}

impl From<PostError> for ApiError {
    fn from(e: PostError) -> Self {
        match e {
            PostError::NotFound => ApiError::NotFound("Post not found".to_string()),
            PostError::EmptyContent | PostError::TooLong(_) => {
                ApiError::InvalidInput(e.to_string())
            }
            PostError::StorageError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ScheduleError> for ApiError {
    fn from(e: ScheduleError) -> Self {
        match e {
            ScheduleError::NotFound => {
                ApiError::NotFound("Scheduled post not found".to_string())
            }
            ScheduleError::UnknownUser => ApiError::NotFound("User not found".to_string()),
            ScheduleError::InvalidPost(msg) => ApiError::InvalidInput(msg),
            ScheduleError::StorageError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<PreferencesError> for ApiError {
    fn from(e: PreferencesError) -> Self {
        match e {
            PreferencesError::StorageError(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::Connection => ApiError::NotReady,
            RepositoryError::NotFound => ApiError::NotFound("Not found".to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database not ready".to_string(),
            ),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "internal error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}
