//! Scheduled-assignment repository trait definition.

use chrono::NaiveDate;

use postcal_types::error::RepositoryError;
use postcal_types::schedule::{ScheduleId, ScheduledPost, ScheduledPostView, TimeSlot};
use postcal_types::user::UserId;

/// Repository trait for scheduled-assignment persistence.
///
/// Implementations live in postcal-infra (SQLite and in-memory). The
/// (date, slot, user) uniqueness invariant is theirs to enforce: `replace`
/// must leave exactly one row at the coordinate regardless of prior state.
pub trait ScheduleRepository: Send + Sync {
    /// Insert `assignment`, first deleting any existing assignment at the
    /// same (date, slot, user) coordinate. The delete-then-insert sequence
    /// is atomic from the caller's point of view.
    fn replace(
        &self,
        assignment: &ScheduledPost,
    ) -> impl std::future::Future<Output = Result<ScheduledPost, RepositoryError>> + Send;

    /// Get an assignment by ID, scoped to the owning user.
    fn get_by_id(
        &self,
        user_id: &UserId,
        id: &ScheduleId,
    ) -> impl std::future::Future<Output = Result<Option<ScheduledPost>, RepositoryError>> + Send;

    /// The assignment at (date, slot) for the user, if any. Pure read.
    fn find_by_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> impl std::future::Future<Output = Result<Option<ScheduledPost>, RepositoryError>> + Send;

    /// Delete an assignment by ID. Returns `NotFound` when absent.
    fn delete_by_id(
        &self,
        user_id: &UserId,
        id: &ScheduleId,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete whatever occupies (date, slot). Returns the number of rows
    /// removed; an empty slot is not an error.
    fn delete_by_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// All assignments for the user joined with post content, ordered by
    /// date ascending then time-slot band order.
    fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<ScheduledPostView>, RepositoryError>> + Send;

    /// Delete assignments whose calendar date is before `cutoff`. Returns
    /// the number of rows removed.
    fn purge_older_than(
        &self,
        cutoff: NaiveDate,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
