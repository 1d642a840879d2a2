//! Preferences repository trait definition.

use postcal_types::error::RepositoryError;
use postcal_types::preferences::Preferences;
use postcal_types::user::UserId;

/// Repository trait for per-user preference records.
///
/// One record per user; `upsert` creates or overwrites it.
pub trait PreferencesRepository: Send + Sync {
    /// The user's stored preferences, or `None` when never saved.
    fn get(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<Preferences>, RepositoryError>> + Send;

    /// Create or overwrite the user's preference record.
    fn upsert(
        &self,
        user_id: &UserId,
        preferences: &Preferences,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
