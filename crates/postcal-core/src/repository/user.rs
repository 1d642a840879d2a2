//! User repository trait definition.

use postcal_types::error::RepositoryError;
use postcal_types::user::{User, UserId};

/// Repository trait for user persistence.
///
/// Implementations live in postcal-infra (SQLite and in-memory).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait UserRepository: Send + Sync {
    /// Create a new user. Returns the created user.
    fn create(
        &self,
        user: &User,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Get a user by its unique ID.
    fn get_by_id(
        &self,
        id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// The deployment's first (and only) user, if one has been created.
    fn first(
        &self,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;
}
