//! Types for the content-generation boundary.
//!
//! Candidate posts are transient: they live in the caller's session until
//! explicitly saved, and their ids are local markers, never storage keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Prefix distinguishing transient candidate ids from persisted post ids.
pub const CANDIDATE_ID_PREFIX: &str = "cand_";

/// A generated, not-yet-saved draft post.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePost {
    /// Locally generated id (`cand_…`), not a storage key.
    pub id: String,
    pub content: String,
    pub topic: String,
    pub created_at: DateTime<Utc>,
}

impl CandidatePost {
    /// Build a candidate with a fresh local id.
    pub fn new(content: String, topic: String) -> Self {
        Self {
            id: format!("{CANDIDATE_ID_PREFIX}{}", Uuid::now_v7().simple()),
            content,
            topic,
            created_at: Utc::now(),
        }
    }
}

/// A single non-streaming completion request to the text-generation backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptSpec {
    /// Persona instruction template (system prompt).
    pub system: String,
    /// The user-visible request built from the topic.
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Errors from the external text-generation call.
///
/// Every variant follows the same recovery path at the adapter level: the
/// deterministic template fallback. Nothing here reaches the end user.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("provider request failed: {0}")]
    Http(String),

    #[error("provider returned an error: {message}")]
    Provider { message: String },

    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
}
