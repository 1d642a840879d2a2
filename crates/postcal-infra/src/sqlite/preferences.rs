//! SQLite preferences repository implementation.
//!
//! One row per user; interests stored as a JSON array in a TEXT column.

use chrono::Utc;
use sqlx::Row;
use uuid::Uuid;

use postcal_core::repository::preferences::PreferencesRepository;
use postcal_types::error::RepositoryError;
use postcal_types::preferences::{Preferences, Tone};
use postcal_types::user::UserId;

use super::pool::DatabasePool;
use super::user::format_datetime;

/// SQLite-backed implementation of `PreferencesRepository`.
#[derive(Clone)]
pub struct SqlitePreferencesRepository {
    pool: DatabasePool,
}

impl SqlitePreferencesRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl PreferencesRepository for SqlitePreferencesRepository {
    async fn get(&self, user_id: &UserId) -> Result<Option<Preferences>, RepositoryError> {
        let row = sqlx::query(
            "SELECT interests, tone, post_count FROM user_preferences WHERE user_id = ?",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let interests_json: String = row
            .try_get("interests")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let tone: String = row
            .try_get("tone")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let post_count: i64 = row
            .try_get("post_count")
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let interests: Vec<String> = serde_json::from_str(&interests_json)
            .map_err(|e| RepositoryError::Query(format!("invalid interests JSON: {e}")))?;
        let tone: Tone = tone.parse().map_err(RepositoryError::Query)?;

        Ok(Some(Preferences {
            interests,
            tone,
            post_count: post_count.clamp(1, u8::MAX as i64) as u8,
        }))
    }

    async fn upsert(
        &self,
        user_id: &UserId,
        preferences: &Preferences,
    ) -> Result<(), RepositoryError> {
        let interests_json = serde_json::to_string(&preferences.interests)
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let now = format_datetime(&Utc::now());

        sqlx::query(
            "INSERT INTO user_preferences
             (id, user_id, interests, tone, post_count, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_id) DO UPDATE SET
                 interests = excluded.interests,
                 tone = excluded.tone,
                 post_count = excluded.post_count,
                 updated_at = excluded.updated_at",
        )
        .bind(Uuid::now_v7().to_string())
        .bind(user_id.to_string())
        .bind(&interests_json)
        .bind(preferences.tone.to_string())
        .bind(preferences.post_count as i64)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::user::SqliteUserRepository;
    use postcal_core::repository::user::UserRepository;
    use postcal_types::user::User;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    async fn seed_user(pool: &DatabasePool) -> UserId {
        let users = SqliteUserRepository::new(pool.clone());
        let user = User {
            id: UserId::new(),
            email: "default@postcal.local".to_string(),
            created_at: Utc::now(),
        };
        users.create(&user).await.unwrap();
        user.id
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let repo = SqlitePreferencesRepository::new(pool);

        assert!(repo.get(&user_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_then_get() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let repo = SqlitePreferencesRepository::new(pool);

        let prefs = Preferences {
            interests: vec!["rust".to_string(), "coffee".to_string()],
            tone: Tone::Casual,
            post_count: 3,
        };
        repo.upsert(&user_id, &prefs).await.unwrap();

        let found = repo.get(&user_id).await.unwrap().unwrap();
        assert_eq!(found.interests, vec!["rust", "coffee"]);
        assert_eq!(found.tone, Tone::Casual);
        assert_eq!(found.post_count, 3);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_single_record() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let repo = SqlitePreferencesRepository::new(pool.clone());

        repo.upsert(&user_id, &Preferences::default()).await.unwrap();
        repo.upsert(
            &user_id,
            &Preferences {
                interests: vec!["tea".to_string()],
                tone: Tone::Humorous,
                post_count: 5,
            },
        )
        .await
        .unwrap();

        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM user_preferences WHERE user_id = ?")
                .bind(user_id.to_string())
                .fetch_one(&pool.reader)
                .await
                .unwrap();
        assert_eq!(count.0, 1);

        let found = repo.get(&user_id).await.unwrap().unwrap();
        assert_eq!(found.tone, Tone::Humorous);
        assert_eq!(found.interests, vec!["tea"]);
    }
}
