use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// Maximum content length for a post, matching the short-form limit the
/// calendar is built around.
pub const MAX_POST_CHARS: usize = 280;

/// Topic label substituted when the user's input yields no usable segment.
pub const DEFAULT_TOPIC: &str = "General";

/// Unique identifier for a saved post, wrapping a UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Create a new PostId using UUID v7.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Create a PostId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PostId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A persisted post.
///
/// Created when the user saves a generated candidate, or when an unsaved
/// candidate is scheduled directly. `character_count` is derived from the
/// content at save time and stored redundantly for listing queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub topic: String,
    pub character_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Build a new post for `user_id`, deriving the character count.
    ///
    /// Content is taken as-is; validation (non-empty, length cap) happens
    /// at the service boundary.
    pub fn new(user_id: UserId, content: String, topic: String) -> Self {
        let character_count = content.chars().count() as i64;
        Self {
            id: PostId::new(),
            user_id,
            content,
            topic,
            character_count,
            created_at: Utc::now(),
        }
    }
}

/// Post payload as received from the client.
///
/// `id` may name an already-saved post (a UUID) or carry a transient
/// candidate id (`cand_…`), which is not a storage key. Fields are optional
/// so the boundary can report missing ones instead of failing
/// deserialization wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IncomingPost {
    pub id: Option<String>,
    pub content: Option<String>,
    pub topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_derives_character_count() {
        let post = Post::new(UserId::new(), "hello".into(), "General".into());
        assert_eq!(post.character_count, 5);
    }

    #[test]
    fn test_character_count_is_chars_not_bytes() {
        let post = Post::new(UserId::new(), "héllo ☀".into(), "General".into());
        assert_eq!(post.character_count, 7);
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post = Post::new(UserId::new(), "hi".into(), "General".into());
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("characterCount").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("character_count").is_none());
    }
}
