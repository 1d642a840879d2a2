//! Shared map store backing the in-memory repositories.

use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use postcal_types::post::Post;
use postcal_types::preferences::Preferences;
use postcal_types::schedule::ScheduledPost;
use postcal_types::user::User;

/// All in-memory tables behind one cheaply clonable handle.
///
/// Repositories clone the store the way SQLite repositories clone the
/// pool; every clone sees the same maps.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    users: DashMap<Uuid, User>,
    posts: DashMap<Uuid, Post>,
    schedules: DashMap<Uuid, ScheduledPost>,
    preferences: DashMap<Uuid, Preferences>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn users(&self) -> &DashMap<Uuid, User> {
        &self.inner.users
    }

    pub(crate) fn posts(&self) -> &DashMap<Uuid, Post> {
        &self.inner.posts
    }

    pub(crate) fn schedules(&self) -> &DashMap<Uuid, ScheduledPost> {
        &self.inner.schedules
    }

    pub(crate) fn preferences(&self) -> &DashMap<Uuid, Preferences> {
        &self.inner.preferences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use postcal_types::user::UserId;

    #[test]
    fn test_clones_share_state() {
        let store = MemoryStore::new();
        let clone = store.clone();

        let user = User {
            id: UserId::new(),
            email: "default@postcal.local".to_string(),
            created_at: Utc::now(),
        };
        store.users().insert(user.id.0, user.clone());

        assert!(clone.users().contains_key(&user.id.0));
    }
}
