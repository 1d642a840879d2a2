//! In-memory post repository implementation.

use chrono::{DateTime, Utc};

use postcal_core::repository::post::PostRepository;
use postcal_types::error::RepositoryError;
use postcal_types::post::{Post, PostId};
use postcal_types::user::UserId;

use super::store::MemoryStore;

/// Map-backed implementation of `PostRepository`.
#[derive(Clone)]
pub struct MemoryPostRepository {
    store: MemoryStore,
}

impl MemoryPostRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl PostRepository for MemoryPostRepository {
    async fn create(&self, post: &Post) -> Result<Post, RepositoryError> {
        self.store.posts().insert(post.id.0, post.clone());
        Ok(post.clone())
    }

    async fn get_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        Ok(self.store.posts().get(&id.0).map(|p| p.clone()))
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Post>, RepositoryError> {
        let mut posts: Vec<Post> = self
            .store
            .posts()
            .iter()
            .filter(|p| p.user_id == *user_id)
            .map(|p| p.clone())
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn delete_with_assignments(
        &self,
        user_id: &UserId,
        id: &PostId,
    ) -> Result<(), RepositoryError> {
        let owned = self
            .store
            .posts()
            .get(&id.0)
            .is_some_and(|p| p.user_id == *user_id);
        if !owned {
            return Err(RepositoryError::NotFound);
        }

        // Assignments go first, matching the SQLite transaction's ordering.
        self.store.schedules().retain(|_, s| s.post_id != *id);
        self.store.posts().remove(&id.0);
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let stale: Vec<PostId> = self
            .store
            .posts()
            .iter()
            .filter(|p| p.created_at < cutoff)
            .map(|p| p.id)
            .collect();

        self.store
            .schedules()
            .retain(|_, s| !stale.contains(&s.post_id));
        for id in &stale {
            self.store.posts().remove(&id.0);
        }
        Ok(stale.len() as u64)
    }
}
