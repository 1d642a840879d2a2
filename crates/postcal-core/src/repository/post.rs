//! Post repository trait definition.

use chrono::{DateTime, Utc};

use postcal_types::error::RepositoryError;
use postcal_types::post::{Post, PostId};
use postcal_types::user::UserId;

/// Repository trait for post persistence.
///
/// Implementations live in postcal-infra (SQLite and in-memory).
pub trait PostRepository: Send + Sync {
    /// Create a new post. Returns the created post.
    fn create(
        &self,
        post: &Post,
    ) -> impl std::future::Future<Output = Result<Post, RepositoryError>> + Send;

    /// Get a post by its unique ID.
    fn get_by_id(
        &self,
        id: &PostId,
    ) -> impl std::future::Future<Output = Result<Option<Post>, RepositoryError>> + Send;

    /// List a user's posts, newest first.
    fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<Post>, RepositoryError>> + Send;

    /// Delete a post and, first, every scheduled assignment referencing it.
    ///
    /// The two deletes are atomic: an assignment row never outlives its
    /// post. Returns `NotFound` when the post does not exist for the user.
    fn delete_with_assignments(
        &self,
        user_id: &UserId,
        id: &PostId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete posts created before `cutoff`, cascading to their
    /// assignments. Returns the number of posts removed.
    fn purge_older_than(
        &self,
        cutoff: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
