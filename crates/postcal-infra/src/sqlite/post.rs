//! SQLite post repository implementation.
//!
//! Implements `PostRepository` from `postcal-core` using sqlx with split
//! read/write pools. Deletes cascade to scheduled assignments inside a
//! writer transaction so an assignment row never outlives its post.

use chrono::{DateTime, Utc};
use sqlx::Row;

use postcal_core::repository::post::PostRepository;
use postcal_types::error::RepositoryError;
use postcal_types::post::{Post, PostId};
use postcal_types::user::UserId;

use super::pool::DatabasePool;
use super::user::{format_datetime, parse_datetime};

/// SQLite-backed implementation of `PostRepository`.
#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: DatabasePool,
}

impl SqlitePostRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain Post.
struct PostRow {
    id: String,
    user_id: String,
    content: String,
    topic: String,
    character_count: i64,
    created_at: String,
}

impl PostRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            content: row.try_get("content")?,
            topic: row.try_get("topic")?,
            character_count: row.try_get("character_count")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_post(self) -> Result<Post, RepositoryError> {
        Ok(Post {
            id: self
                .id
                .parse::<PostId>()
                .map_err(|e| RepositoryError::Query(format!("invalid post id: {e}")))?,
            user_id: self
                .user_id
                .parse::<UserId>()
                .map_err(|e| RepositoryError::Query(format!("invalid user id: {e}")))?,
            content: self.content,
            topic: self.topic,
            character_count: self.character_count,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

impl PostRepository for SqlitePostRepository {
    async fn create(&self, post: &Post) -> Result<Post, RepositoryError> {
        sqlx::query(
            "INSERT INTO posts (id, user_id, content, topic, character_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(post.id.to_string())
        .bind(post.user_id.to_string())
        .bind(&post.content)
        .bind(&post.topic)
        .bind(post.character_count)
        .bind(format_datetime(&post.created_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(post.clone())
    }

    async fn get_by_id(&self, id: &PostId) -> Result<Option<Post>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM posts WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let post_row =
                    PostRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(post_row.into_post()?))
            }
            None => Ok(None),
        }
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Post>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM posts WHERE user_id = ? ORDER BY created_at DESC")
            .bind(user_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in &rows {
            let post_row =
                PostRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            posts.push(post_row.into_post()?);
        }
        Ok(posts)
    }

    async fn delete_with_assignments(
        &self,
        user_id: &UserId,
        id: &PostId,
    ) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Assignments go first so the post row is never orphan-referenced.
        sqlx::query("DELETE FROM scheduled_posts WHERE post_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query("DELETE FROM posts WHERE id = ? AND user_id = ?")
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            return Err(RepositoryError::NotFound);
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(())
    }

    async fn purge_older_than(&self, cutoff: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let cutoff = format_datetime(&cutoff);
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "DELETE FROM scheduled_posts
             WHERE post_id IN (SELECT id FROM posts WHERE created_at < ?)",
        )
        .bind(&cutoff)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let result = sqlx::query("DELETE FROM posts WHERE created_at < ?")
            .bind(&cutoff)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        Ok(result.rows_affected())
    }
}
