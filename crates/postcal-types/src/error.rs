use thiserror::Error;

use crate::post::MAX_POST_CHARS;

/// Errors related to post operations.
#[derive(Debug, Error)]
pub enum PostError {
    #[error("post not found")]
    NotFound,

    #[error("post content is required")]
    EmptyContent,

    #[error("post content exceeds {MAX_POST_CHARS} characters ({0})")]
    TooLong(usize),

    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors related to scheduling operations.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("scheduled post not found")]
    NotFound,

    #[error("unknown user")]
    UnknownUser,

    #[error("invalid post payload: {0}")]
    InvalidPost(String),

    #[error("storage error: {0}")]
    StorageError(String),
}

impl From<PostError> for ScheduleError {
    fn from(e: PostError) -> Self {
        match e {
            PostError::NotFound => ScheduleError::InvalidPost("post not found".to_string()),
            PostError::EmptyContent | PostError::TooLong(_) => {
                ScheduleError::InvalidPost(e.to_string())
            }
            PostError::StorageError(msg) => ScheduleError::StorageError(msg),
        }
    }
}

/// Errors related to preferences operations.
#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from repository operations (used by trait definitions in postcal-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_error_display() {
        let err = PostError::TooLong(300);
        assert_eq!(err.to_string(), "post content exceeds 280 characters (300)");
    }

    #[test]
    fn test_schedule_error_from_post_error() {
        let err: ScheduleError = PostError::EmptyContent.into();
        assert!(matches!(err, ScheduleError::InvalidPost(_)));

        let err: ScheduleError = PostError::StorageError("boom".into()).into();
        assert!(matches!(err, ScheduleError::StorageError(_)));
    }

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }
}
