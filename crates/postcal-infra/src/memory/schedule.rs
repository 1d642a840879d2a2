//! In-memory scheduled-assignment repository implementation.

use chrono::NaiveDate;

use postcal_core::repository::schedule::ScheduleRepository;
use postcal_types::error::RepositoryError;
use postcal_types::schedule::{ScheduleId, ScheduledPost, ScheduledPostView, TimeSlot};
use postcal_types::user::UserId;

use super::store::MemoryStore;

/// Map-backed implementation of `ScheduleRepository`.
#[derive(Clone)]
pub struct MemoryScheduleRepository {
    store: MemoryStore,
}

impl MemoryScheduleRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

fn same_coordinate(s: &ScheduledPost, user_id: &UserId, date: NaiveDate, slot: TimeSlot) -> bool {
    s.user_id == *user_id && s.date == date && s.slot == slot
}

impl ScheduleRepository for MemoryScheduleRepository {
    async fn replace(&self, assignment: &ScheduledPost) -> Result<ScheduledPost, RepositoryError> {
        let schedules = self.store.schedules();
        schedules.retain(|_, s| {
            !same_coordinate(s, &assignment.user_id, assignment.date, assignment.slot)
        });
        schedules.insert(assignment.id.0, assignment.clone());
        Ok(assignment.clone())
    }

    async fn get_by_id(
        &self,
        user_id: &UserId,
        id: &ScheduleId,
    ) -> Result<Option<ScheduledPost>, RepositoryError> {
        Ok(self
            .store
            .schedules()
            .get(&id.0)
            .filter(|s| s.user_id == *user_id)
            .map(|s| s.clone()))
    }

    async fn find_by_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<Option<ScheduledPost>, RepositoryError> {
        Ok(self
            .store
            .schedules()
            .iter()
            .find(|s| same_coordinate(s, user_id, date, slot))
            .map(|s| s.clone()))
    }

    async fn delete_by_id(&self, user_id: &UserId, id: &ScheduleId) -> Result<(), RepositoryError> {
        let owned = self
            .store
            .schedules()
            .get(&id.0)
            .is_some_and(|s| s.user_id == *user_id);
        if !owned {
            return Err(RepositoryError::NotFound);
        }
        self.store.schedules().remove(&id.0);
        Ok(())
    }

    async fn delete_by_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<u64, RepositoryError> {
        let schedules = self.store.schedules();
        let before = schedules.len();
        schedules.retain(|_, s| !same_coordinate(s, user_id, date, slot));
        Ok((before - schedules.len()) as u64)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ScheduledPostView>, RepositoryError> {
        let posts = self.store.posts();
        let mut views: Vec<ScheduledPostView> = self
            .store
            .schedules()
            .iter()
            .filter(|s| s.user_id == *user_id)
            .filter_map(|s| {
                posts.get(&s.post_id.0).map(|p| ScheduledPostView {
                    id: s.id,
                    content: p.content.clone(),
                    topic: p.topic.clone(),
                    day: s.date,
                    time: s.slot,
                    is_scheduled: true,
                    created_at: s.created_at,
                })
            })
            .collect();
        views.sort_by_key(|v| (v.day, v.time.band_index()));
        Ok(views)
    }

    async fn purge_older_than(&self, cutoff: NaiveDate) -> Result<u64, RepositoryError> {
        let schedules = self.store.schedules();
        let before = schedules.len();
        schedules.retain(|_, s| s.date >= cutoff);
        Ok((before - schedules.len()) as u64)
    }
}
