//! SQLite scheduled-assignment repository implementation.
//!
//! `replace` performs the delete-then-insert sequence for a slot inside
//! one writer transaction; the UNIQUE(scheduled_date, scheduled_time,
//! user_id) constraint is the storage-level backstop.

use chrono::NaiveDate;
use sqlx::Row;

use postcal_core::repository::schedule::ScheduleRepository;
use postcal_types::error::RepositoryError;
use postcal_types::post::PostId;
use postcal_types::schedule::{
    ScheduleId, ScheduleStatus, ScheduledPost, ScheduledPostView, TimeSlot,
};
use postcal_types::user::UserId;

use super::pool::DatabasePool;
use super::user::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `ScheduleRepository`.
#[derive(Clone)]
pub struct SqliteScheduleRepository {
    pool: DatabasePool,
}

impl SqliteScheduleRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, RepositoryError> {
    s.parse()
        .map_err(|e| RepositoryError::Query(format!("invalid date: {e}")))
}

fn parse_slot(s: &str) -> Result<TimeSlot, RepositoryError> {
    s.parse().map_err(RepositoryError::Query)
}

/// Internal row type for mapping SQLite rows to domain ScheduledPost.
struct ScheduleRow {
    id: String,
    post_id: String,
    user_id: String,
    scheduled_date: String,
    scheduled_time: String,
    status: String,
    created_at: String,
}

impl ScheduleRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            post_id: row.try_get("post_id")?,
            user_id: row.try_get("user_id")?,
            scheduled_date: row.try_get("scheduled_date")?,
            scheduled_time: row.try_get("scheduled_time")?,
            status: row.try_get("status")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_scheduled_post(self) -> Result<ScheduledPost, RepositoryError> {
        Ok(ScheduledPost {
            id: self
                .id
                .parse::<ScheduleId>()
                .map_err(|e| RepositoryError::Query(format!("invalid schedule id: {e}")))?,
            post_id: self
                .post_id
                .parse::<PostId>()
                .map_err(|e| RepositoryError::Query(format!("invalid post id: {e}")))?,
            user_id: self
                .user_id
                .parse::<UserId>()
                .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
            date: parse_date(&self.scheduled_date)?,
            slot: parse_slot(&self.scheduled_time)?,
            status: self
                .status
                .parse::<ScheduleStatus>()
                .map_err(RepositoryError::Query)?,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl ScheduleRepository for SqliteScheduleRepository {
    async fn replace(&self, assignment: &ScheduledPost) -> Result<ScheduledPost, RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "DELETE FROM scheduled_posts
             WHERE scheduled_date = ? AND scheduled_time = ? AND user_id = ?",
        )
        .bind(assignment.date.to_string())
        .bind(assignment.slot.label())
        .bind(assignment.user_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query(
            "INSERT INTO scheduled_posts
             (id, post_id, user_id, scheduled_date, scheduled_time, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(assignment.id.to_string())
        .bind(assignment.post_id.to_string())
        .bind(assignment.user_id.to_string())
        .bind(assignment.date.to_string())
        .bind(assignment.slot.label())
        .bind(assignment.status.to_string())
        .bind(format_datetime(&assignment.created_at))
        .execute(&mut *tx)
        .await;

        match result {
            Ok(_) => {}
            Err(sqlx::Error::Database(db_err)) if db_err.message().contains("UNIQUE") => {
                return Err(RepositoryError::Conflict(format!(
                    "slot {} on {} is already taken",
                    assignment.slot, assignment.date
                )));
            }
            Err(e) => return Err(RepositoryError::Query(e.to_string())),
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(assignment.clone())
    }

    async fn get_by_id(
        &self,
        user_id: &UserId,
        id: &ScheduleId,
    ) -> Result<Option<ScheduledPost>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM scheduled_posts WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let schedule_row = ScheduleRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(schedule_row.into_scheduled_post()?))
            }
            None => Ok(None),
        }
    }

    async fn find_by_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<Option<ScheduledPost>, RepositoryError> {
        let row = sqlx::query(
            "SELECT * FROM scheduled_posts
             WHERE scheduled_date = ? AND scheduled_time = ? AND user_id = ?",
        )
        .bind(date.to_string())
        .bind(slot.label())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let schedule_row = ScheduleRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(schedule_row.into_scheduled_post()?))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, user_id: &UserId, id: &ScheduleId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM scheduled_posts WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_by_slot(
        &self,
        user_id: &UserId,
        date: NaiveDate,
        slot: TimeSlot,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "DELETE FROM scheduled_posts
             WHERE scheduled_date = ? AND scheduled_time = ? AND user_id = ?",
        )
        .bind(date.to_string())
        .bind(slot.label())
        .bind(user_id.to_string())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<ScheduledPostView>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT sp.id, sp.scheduled_date, sp.scheduled_time, sp.created_at,
                    p.content, p.topic
             FROM scheduled_posts sp
             JOIN posts p ON sp.post_id = p.id
             WHERE sp.user_id = ?
             ORDER BY sp.scheduled_date",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut views = Vec::with_capacity(rows.len());
        for row in &rows {
            let id: String = row
                .try_get("id")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let scheduled_date: String = row
                .try_get("scheduled_date")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let scheduled_time: String = row
                .try_get("scheduled_time")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let created_at: String = row
                .try_get("created_at")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let content: String = row
                .try_get("content")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            let topic: String = row
                .try_get("topic")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;

            views.push(ScheduledPostView {
                id: id
                    .parse::<ScheduleId>()
                    .map_err(|e| RepositoryError::Query(format!("invalid schedule id: {e}")))?,
                content,
                topic,
                day: parse_date(&scheduled_date)?,
                time: parse_slot(&scheduled_time)?,
                is_scheduled: true,
                created_at: parse_datetime(&created_at)?,
            });
        }

        // Band order is not the lexicographic order of the slot labels
        // ("13:00-…" sorts before "7:00-…"), so sort here.
        views.sort_by_key(|v| (v.day, v.time.band_index()));
        Ok(views)
    }

    async fn purge_older_than(&self, cutoff: NaiveDate) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM scheduled_posts WHERE scheduled_date < ?")
            .bind(cutoff.to_string())
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::post::SqlitePostRepository;
    use crate::sqlite::user::SqliteUserRepository;
    use chrono::Utc;
    use postcal_core::repository::post::PostRepository;
    use postcal_core::repository::user::UserRepository;
    use postcal_types::post::Post;
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

    async fn seed_post(pool: &DatabasePool, user_id: UserId, content: &str) -> Post {
        let posts = SqlitePostRepository::new(pool.clone());
        let post = Post::new(user_id, content.to_string(), "t".to_string());
        posts.create(&post).await.unwrap();
        post
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_replace_into_empty_slot() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let post = seed_post(&pool, user_id, "hello").await;
        let repo = SqliteScheduleRepository::new(pool);

        let assignment =
            ScheduledPost::new(post.id, user_id, date("2025-03-10"), TimeSlot::NineToEleven);
        repo.replace(&assignment).await.unwrap();

        let found = repo
            .find_by_slot(&user_id, date("2025-03-10"), TimeSlot::NineToEleven)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, assignment.id);
        assert_eq!(found.post_id, post.id);
        assert_eq!(found.status, ScheduleStatus::Scheduled);
    }

    #[tokio::test]
    async fn test_replace_overwrites_occupant() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let first_post = seed_post(&pool, user_id, "first").await;
        let second_post = seed_post(&pool, user_id, "second").await;
        let repo = SqliteScheduleRepository::new(pool);
        let d = date("2025-03-10");

        let first = ScheduledPost::new(first_post.id, user_id, d, TimeSlot::NineToEleven);
        repo.replace(&first).await.unwrap();
        let second = ScheduledPost::new(second_post.id, user_id, d, TimeSlot::NineToEleven);
        repo.replace(&second).await.unwrap();

        let found = repo
            .find_by_slot(&user_id, d, TimeSlot::NineToEleven)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.post_id, second_post.id);

        // The first assignment's row is gone entirely.
        assert!(repo.get_by_id(&user_id, &first.id).await.unwrap().is_none());
        assert_eq!(repo.list_for_user(&user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_by_slot_counts() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let post = seed_post(&pool, user_id, "p").await;
        let repo = SqliteScheduleRepository::new(pool);
        let d = date("2025-03-10");

        // Empty slot deletes nothing and is not an error.
        assert_eq!(
            repo.delete_by_slot(&user_id, d, TimeSlot::SevenToNine).await.unwrap(),
            0
        );

        repo.replace(&ScheduledPost::new(post.id, user_id, d, TimeSlot::SevenToNine))
            .await
            .unwrap();
        assert_eq!(
            repo.delete_by_slot(&user_id, d, TimeSlot::SevenToNine).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_delete_by_id_not_found() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let repo = SqliteScheduleRepository::new(pool);

        let err = repo
            .delete_by_id(&user_id, &ScheduleId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_list_joins_and_orders_by_band() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let evening = seed_post(&pool, user_id, "evening post").await;
        let morning = seed_post(&pool, user_id, "morning post").await;
        let repo = SqliteScheduleRepository::new(pool);
        let d = date("2025-03-10");

        // Inserted evening first; "19:00-21:00" sorts before "7:00-9:00"
        // lexicographically, which the band sort must correct.
        repo.replace(&ScheduledPost::new(evening.id, user_id, d, TimeSlot::NineteenToTwentyOne))
            .await
            .unwrap();
        repo.replace(&ScheduledPost::new(morning.id, user_id, d, TimeSlot::SevenToNine))
            .await
            .unwrap();

        let views = repo.list_for_user(&user_id).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].content, "morning post");
        assert_eq!(views[1].content, "evening post");
        assert!(views.iter().all(|v| v.is_scheduled));
    }

    #[tokio::test]
    async fn test_purge_by_date() {
        let pool = test_pool().await;
        let user_id = seed_user(&pool).await;
        let post = seed_post(&pool, user_id, "p").await;
        let repo = SqliteScheduleRepository::new(pool);

        repo.replace(&ScheduledPost::new(post.id, user_id, date("2024-01-05"), TimeSlot::SevenToNine))
            .await
            .unwrap();
        repo.replace(&ScheduledPost::new(post.id, user_id, date("2025-03-10"), TimeSlot::SevenToNine))
            .await
            .unwrap();

        let removed = repo.purge_older_than(date("2025-01-01")).await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(repo.list_for_user(&user_id).await.unwrap().len(), 1);
    }
}
