//! Saved-post service: persist candidates, list, delete with cascade.

use postcal_types::error::{PostError, RepositoryError};
use postcal_types::post::{DEFAULT_TOPIC, MAX_POST_CHARS, Post, PostId};
use postcal_types::user::UserId;

use crate::repository::post::PostRepository;

/// Validate post content at the service boundary.
///
/// Returns the trimmed content; empty or over-limit content is rejected.
pub fn validate_content(content: &str) -> Result<&str, PostError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(PostError::EmptyContent);
    }
    let len = trimmed.chars().count();
    if len > MAX_POST_CHARS {
        return Err(PostError::TooLong(len));
    }
    Ok(trimmed)
}

/// Service for the saved-post lifecycle.
pub struct PostService<P: PostRepository> {
    posts: P,
}

impl<P: PostRepository> PostService<P> {
    pub fn new(posts: P) -> Self {
        Self { posts }
    }

    /// Persist a candidate as a saved post, deriving the character count.
    pub async fn save(
        &self,
        user_id: &UserId,
        content: &str,
        topic: Option<&str>,
    ) -> Result<Post, PostError> {
        let content = validate_content(content)?;
        let topic = topic
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TOPIC);

        let post = Post::new(*user_id, content.to_string(), topic.to_string());
        self.posts
            .create(&post)
            .await
            .map_err(|e| PostError::StorageError(e.to_string()))
    }

    /// The user's saved posts, newest first.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<Post>, PostError> {
        self.posts
            .list_for_user(user_id)
            .await
            .map_err(|e| PostError::StorageError(e.to_string()))
    }

    /// Delete a saved post; its scheduled assignments go first so no
    /// assignment ever references a missing post.
    pub async fn delete(&self, user_id: &UserId, id: &PostId) -> Result<(), PostError> {
        match self.posts.delete_with_assignments(user_id, id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(PostError::NotFound),
            Err(e) => Err(PostError::StorageError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_trims_content() {
        assert_eq!(validate_content("  hello  ").unwrap(), "hello");
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(matches!(validate_content(""), Err(PostError::EmptyContent)));
        assert!(matches!(validate_content("   "), Err(PostError::EmptyContent)));
    }

    #[test]
    fn test_validate_rejects_overlong() {
        let long = "x".repeat(281);
        assert!(matches!(validate_content(&long), Err(PostError::TooLong(281))));
    }

    #[test]
    fn test_validate_accepts_exactly_280() {
        let exact = "x".repeat(280);
        assert!(validate_content(&exact).is_ok());
    }
}
