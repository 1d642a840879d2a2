//! Scheduling engine.
//!
//! Binds content to calendar coordinates under the one-post-per-slot
//! invariant. Assigning into an occupied slot replaces the prior occupant
//! (last write wins); unassigning an empty coordinate is a no-op. Each
//! operation is a single request/response transition on the per-slot
//! state machine: Empty <-> Occupied, with replacement staying Occupied.

use chrono::NaiveDate;

use postcal_types::error::{RepositoryError, ScheduleError};
use postcal_types::post::{DEFAULT_TOPIC, IncomingPost, Post, PostId};
use postcal_types::schedule::{ScheduleId, ScheduledPost, ScheduledPostView, TimeSlot};
use postcal_types::user::UserId;

use crate::repository::post::PostRepository;
use crate::repository::schedule::ScheduleRepository;
use crate::repository::user::UserRepository;
use crate::service::post::validate_content;

fn storage(e: RepositoryError) -> ScheduleError {
    ScheduleError::StorageError(e.to_string())
}

/// Service orchestrating scheduled assignments.
///
/// Generic over repository traits -- postcal-core never depends on
/// postcal-infra.
pub struct ScheduleService<S: ScheduleRepository, P: PostRepository, U: UserRepository> {
    schedules: S,
    posts: P,
    users: U,
}

impl<S: ScheduleRepository, P: PostRepository, U: UserRepository> ScheduleService<S, P, U> {
    pub fn new(schedules: S, posts: P, users: U) -> Self {
        Self {
            schedules,
            posts,
            users,
        }
    }

    /// Bind a post to (date, slot) for the user.
    ///
    /// An unsaved candidate is persisted first, deriving its character
    /// count. Whatever occupied the slot is replaced; after the call
    /// exactly one assignment exists at the coordinate.
    pub async fn assign(
        &self,
        user_id: &UserId,
        incoming: IncomingPost,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<ScheduledPostView, ScheduleError> {
        if self.users.get_by_id(user_id).await.map_err(storage)?.is_none() {
            return Err(ScheduleError::UnknownUser);
        }

        let post = self.resolve_post(user_id, incoming).await?;
        let assignment = ScheduledPost::new(post.id, *user_id, date, slot);
        let stored = self
            .schedules
            .replace(&assignment)
            .await
            .map_err(storage)?;

        tracing::debug!(
            schedule_id = %stored.id,
            post_id = %post.id,
            date = %date,
            slot = %slot,
            "assigned post to slot"
        );

        Ok(ScheduledPostView {
            id: stored.id,
            content: post.content,
            topic: post.topic,
            day: stored.date,
            time: stored.slot,
            is_scheduled: true,
            created_at: stored.created_at,
        })
    }

    /// Resolve the incoming payload to a persisted post.
    ///
    /// A UUID id must name an existing post of this user; candidate ids
    /// (`cand_…`) and missing ids mean the content is saved inline.
    async fn resolve_post(
        &self,
        user_id: &UserId,
        incoming: IncomingPost,
    ) -> Result<Post, ScheduleError> {
        if let Some(id_str) = incoming.id.as_deref() {
            if let Ok(post_id) = id_str.parse::<PostId>() {
                match self.posts.get_by_id(&post_id).await.map_err(storage)? {
                    Some(post) if post.user_id == *user_id => return Ok(post),
                    _ => {
                        return Err(ScheduleError::InvalidPost(format!(
                            "post '{id_str}' not found"
                        )));
                    }
                }
            }
        }

        let content = validate_content(incoming.content.as_deref().unwrap_or(""))?;
        let topic = incoming
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TOPIC);

        let post = Post::new(*user_id, content.to_string(), topic.to_string());
        self.posts.create(&post).await.map_err(storage)
    }

    /// Remove an assignment by id. Unknown ids are `NotFound`.
    pub async fn unassign(&self, user_id: &UserId, id: &ScheduleId) -> Result<(), ScheduleError> {
        match self.schedules.delete_by_id(user_id, id).await {
            Ok(()) => Ok(()),
            Err(RepositoryError::NotFound) => Err(ScheduleError::NotFound),
            Err(e) => Err(storage(e)),
        }
    }

    /// Empty the (date, slot) coordinate. Already-empty is not an error.
    pub async fn unassign_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<u64, ScheduleError> {
        self.schedules
            .delete_by_slot(user_id, date, slot)
            .await
            .map_err(storage)
    }

    /// The assignment at (date, slot), if any. Pure read.
    pub async fn lookup(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<Option<ScheduledPost>, ScheduleError> {
        self.schedules
            .find_by_slot(user_id, date, slot)
            .await
            .map_err(storage)
    }

    /// All assignments for the calendar, date ascending then band order.
    pub async fn list(&self, user_id: &UserId) -> Result<Vec<ScheduledPostView>, ScheduleError> {
        self.schedules.list_for_user(user_id).await.map_err(storage)
    }
}
