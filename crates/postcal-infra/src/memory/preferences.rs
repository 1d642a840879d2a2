//! In-memory preferences repository implementation.

use postcal_core::repository::preferences::PreferencesRepository;
use postcal_types::error::RepositoryError;
use postcal_types::preferences::Preferences;
use postcal_types::user::UserId;

use super::store::MemoryStore;

/// Map-backed implementation of `PreferencesRepository`.
#[derive(Clone)]
pub struct MemoryPreferencesRepository {
    store: MemoryStore,
}

impl MemoryPreferencesRepository {
    pub fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

impl PreferencesRepository for MemoryPreferencesRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<Preferences>, RepositoryError> {
        Ok(self.store.preferences().get(&user_id.0).map(|p| p.clone()))
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        preferences: &Preferences,
    ) -> Result<(), RepositoryError> {
        self.store
            .preferences()
            .insert(user_id.0, preferences.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use postcal_types::preferences::Tone;

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let repo = MemoryPreferencesRepository::new(MemoryStore::new());
        assert!(repo.get(&UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_overwrites() {
        let repo = MemoryPreferencesRepository::new(MemoryStore::new());
        let user_id = UserId::new();

        repo.upsert(&user_id, &Preferences::default()).await.unwrap();
        repo.upsert(
            &user_id,
            &Preferences {
                interests: vec!["tea".to_string()],
                tone: Tone::Inspirational,
                post_count: 2,
            },
        )
        .await
        .unwrap();

        let found = repo.get(&user_id).await.unwrap().unwrap();
        assert_eq!(found.tone, Tone::Inspirational);
        assert_eq!(found.post_count, 2);
    }
}
