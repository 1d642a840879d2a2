//! Preferences service: read with defaults, upsert with sanitization.

use postcal_types::error::PreferencesError;
use postcal_types::preferences::{MAX_INTERESTS, Preferences, PreferencesUpdate};
use postcal_types::user::UserId;

use crate::repository::preferences::PreferencesRepository;

/// Desired post count is kept within this range.
const POST_COUNT_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Service for per-user generation preferences.
pub struct PreferencesService<R: PreferencesRepository> {
    preferences: R,
}

impl<R: PreferencesRepository> PreferencesService<R> {
    pub fn new(preferences: R) -> Self {
        Self { preferences }
    }

    /// The user's preferences, or the defaults when never saved.
    pub async fn get(&self, user_id: &UserId) -> Result<Preferences, PreferencesError> {
        let stored = self
            .preferences
            .get(user_id)
            .await
            .map_err(|e| PreferencesError::StorageError(e.to_string()))?;
        Ok(stored.unwrap_or_default())
    }

    /// Apply a partial update and persist the merged record.
    ///
    /// Interests are trimmed, de-blanked, and capped at [`MAX_INTERESTS`]:
    /// a sixth tag is dropped, never stored. Post count is clamped into
    /// its valid range.
    pub async fn save(
        &self,
        user_id: &UserId,
        update: PreferencesUpdate,
    ) -> Result<Preferences, PreferencesError> {
        let mut prefs = self.get(user_id).await?;

        if let Some(interests) = update.interests {
            prefs.interests = interests
                .into_iter()
                .map(|tag| tag.trim().to_string())
                .filter(|tag| !tag.is_empty())
                .take(MAX_INTERESTS)
                .collect();
        }
        if let Some(tone) = update.tone {
            prefs.tone = tone;
        }
        if let Some(count) = update.post_count {
            prefs.post_count = count.clamp(*POST_COUNT_RANGE.start(), *POST_COUNT_RANGE.end());
        }

        self.preferences
            .upsert(user_id, &prefs)
            .await
            .map_err(|e| PreferencesError::StorageError(e.to_string()))?;
        Ok(prefs)
    }
}
