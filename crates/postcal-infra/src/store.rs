//! Backend selection: one gateway interface, two interchangeable backends.
//!
//! Each repository port gets a two-variant enum delegating to the active
//! backend, so the service layer and HTTP handlers stay non-generic over
//! storage. [`StoreHealth`] is the explicit readiness probe the health
//! endpoint reports -- there is no free-floating "is ready" flag.

use chrono::{DateTime, NaiveDate, Utc};

use postcal_core::repository::post::PostRepository;
use postcal_core::repository::preferences::PreferencesRepository;
use postcal_core::repository::schedule::ScheduleRepository;
use postcal_core::repository::user::UserRepository;
use postcal_types::error::RepositoryError;
use postcal_types::post::{Post, PostId};
use postcal_types::preferences::Preferences;
use postcal_types::schedule::{ScheduleId, ScheduledPost, ScheduledPostView, TimeSlot};
use postcal_types::user::{User, UserId};

use crate::memory::post::MemoryPostRepository;
use crate::memory::preferences::MemoryPreferencesRepository;
use crate::memory::schedule::MemoryScheduleRepository;
use crate::memory::store::MemoryStore;
use crate::memory::user::MemoryUserRepository;
use crate::sqlite::pool::DatabasePool;
use crate::sqlite::post::SqlitePostRepository;
use crate::sqlite::preferences::SqlitePreferencesRepository;
use crate::sqlite::schedule::SqliteScheduleRepository;
use crate::sqlite::user::SqliteUserRepository;

/// User repository over the configured backend.
#[derive(Clone)]
pub enum UserStore {
    Sqlite(SqliteUserRepository),
    Memory(MemoryUserRepository),
}

impl UserRepository for UserStore {
    async fn create(&self, user: &User) -> Result<User, RepositoryError> {
        match self {
            UserStore::Sqlite(repo) => repo.create(user).await,
            UserStore::Memory(repo) => repo.create(user).await,
        }
    }

    async fn get_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError> {
        match self {
            UserStore::Sqlite(repo) => repo.get_by_id(id).await,
            UserStore::Memory(repo) => repo.get_by_id(id).await,
        }
    }

    async fn first(&self) -> Result<Option<User>, RepositoryError> {
        match self {
            UserStore::Sqlite(repo) => repo.first().await,
            UserStore::Memory(repo) => repo.first().await,
        }
    }
}

/// Post repository over the configured backend.
#[derive(Clone)]
pub enum PostStore {
    Sqlite(SqlitePostRepository),
    Memory(MemoryPostRepository),
}

impl PostRepository for PostStore {
    async fn create(&self, post: &Post) -> Result<Post, RepositoryError> {
        match self {
            PostStore::Sqlite(repo) => repo.create(post).await,
            PostStore::Memory(repo) => repo.create(post).await,
        }
    }

    async fn get_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        match self {
            PostStore::Sqlite(repo) => repo.get_by_id(id).await,
            PostStore::Memory(repo) => repo.get_by_id(id).await,
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Post>, RepositoryError> {
        match self {
            PostStore::Sqlite(repo) => repo.list_for_user(user_id).await,
            PostStore::Memory(repo) => repo.list_for_user(user_id).await,
        }
    }

    async fn delete_with_assignments(
        &self,
        user_id: &UserId,
        id: &PostId,
    ) -> Result<(), RepositoryError> {
        match self {
            PostStore::Sqlite(repo) => repo.delete_with_assignments(user_id, id).await,
            PostStore::Memory(repo) => repo.delete_with_assignments(user_id, id).await,
        }
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        match self {
            PostStore::Sqlite(repo) => repo.purge_older_than(cutoff).await,
            PostStore::Memory(repo) => repo.purge_older_than(cutoff).await,
        }
    }
}

/// Scheduled-assignment repository over the configured backend.
#[derive(Clone)]
pub enum ScheduleStore {
    Sqlite(SqliteScheduleRepository),
    Memory(MemoryScheduleRepository),
}

impl ScheduleRepository for ScheduleStore {
    async fn replace(&self, assignment: &ScheduledPost) -> Result<ScheduledPost, RepositoryError> {
        match self {
            ScheduleStore::Sqlite(repo) => repo.replace(assignment).await,
            ScheduleStore::Memory(repo) => repo.replace(assignment).await,
        }
    }

    async fn get_by_id(
        &self,
        user_id: &UserId,
        id: &ScheduleId,
    ) -> Result<Option<ScheduledPost>, RepositoryError> {
        match self {
            ScheduleStore::Sqlite(repo) => repo.get_by_id(user_id, id).await,
            ScheduleStore::Memory(repo) => repo.get_by_id(user_id, id).await,
        }
    }

    async fn find_by_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<Option<ScheduledPost>, RepositoryError> {
        match self {
            ScheduleStore::Sqlite(repo) => repo.find_by_slot(user_id, date, slot).await,
            ScheduleStore::Memory(repo) => repo.find_by_slot(user_id, date, slot).await,
        }
    }

    async fn delete_by_id(&self, user_id: &UserId, id: &ScheduleId) -> Result<(), RepositoryError> {
        match self {
            ScheduleStore::Sqlite(repo) => repo.delete_by_id(user_id, id).await,
            ScheduleStore::Memory(repo) => repo.delete_by_id(user_id, id).await,
        }
    }

    async fn delete_by_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<u64, RepositoryError> {
        match self {
            ScheduleStore::Sqlite(repo) => repo.delete_by_slot(user_id, date, slot).await,
            ScheduleStore::Memory(repo) => repo.delete_by_slot(user_id, date, slot).await,
        }
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ScheduledPostView>, RepositoryError> {
        match self {
            ScheduleStore::Sqlite(repo) => repo.list_for_user(user_id).await,
            ScheduleStore::Memory(repo) => repo.list_for_user(user_id).await,
        }
    }

    async fn purge_older_than(&self, cutoff: NaiveDate) -> Result<u64, RepositoryError> {
        match self {
            ScheduleStore::Sqlite(repo) => repo.purge_older_than(cutoff).await,
            ScheduleStore::Memory(repo) => repo.purge_older_than(cutoff).await,
        }
    }
}

/// Preferences repository over the configured backend.
#[derive(Clone)]
pub enum PreferencesStore {
    Sqlite(SqlitePreferencesRepository),
    Memory(MemoryPreferencesRepository),
}

impl PreferencesRepository for PreferencesStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Preferences>, RepositoryError> {
        match self {
            PreferencesStore::Sqlite(repo) => repo.get(user_id).await,
            PreferencesStore::Memory(repo) => repo.get(user_id).await,
        }
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        preferences: &Preferences,
    ) -> Result<(), RepositoryError> {
        match self {
            PreferencesStore::Sqlite(repo) => repo.upsert(user_id, preferences).await,
            PreferencesStore::Memory(repo) => repo.upsert(user_id, preferences).await,
        }
    }
}

/// Readiness probe for the configured backend.
#[derive(Clone)]
pub enum StoreHealth {
    Sqlite(DatabasePool),
    Memory,
}

impl StoreHealth {
    /// Whether the store can answer a query right now.
    pub async fn check(&self) -> Result<(), RepositoryError> {
        match self {
            StoreHealth::Sqlite(pool) => pool
                .health_check()
                .await
                .map_err(|_| RepositoryError::Connection),
            StoreHealth::Memory => Ok(()),
        }
    }
}

/// All stores for one configured backend, wired together.
pub struct Stores {
    pub users: UserStore,
    pub posts: PostStore,
    pub schedules: ScheduleStore,
    pub preferences: PreferencesStore,
    pub health: StoreHealth,
}

impl Stores {
    /// Durable backend over a SQLite pool.
    pub fn sqlite(pool: DatabasePool) -> Self {
        Self {
            users: UserStore::Sqlite(SqliteUserRepository::new(pool.clone())),
            posts: PostStore::Sqlite(SqlitePostRepository::new(pool.clone())),
            schedules: ScheduleStore::Sqlite(SqliteScheduleRepository::new(pool.clone())),
            preferences: PreferencesStore::Sqlite(SqlitePreferencesRepository::new(pool.clone())),
            health: StoreHealth::Sqlite(pool),
        }
    }

    /// Transient process-local backend.
    pub fn memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: UserStore::Memory(MemoryUserRepository::new(store.clone())),
            posts: PostStore::Memory(MemoryPostRepository::new(store.clone())),
            schedules: ScheduleStore::Memory(MemoryScheduleRepository::new(store.clone())),
            preferences: PreferencesStore::Memory(MemoryPreferencesRepository::new(store)),
            health: StoreHealth::Memory,
        }
    }
}
