//! Preferences handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use postcal_types::preferences::{Preferences, PreferencesUpdate, Tone};

use crate::http::error::ApiError;
use crate::http::handlers::post::MessageResponse;
use crate::state::AppState;

/// Request body for POST /api/preferences.
///
/// Tone arrives as a string so an unknown label surfaces as a structured
/// 400; the count is range-checked in the service.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesPayload {
    pub interests: Option<Vec<String>>,
    pub tone: Option<String>,
    pub post_count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: Preferences,
}

/// GET /api/preferences - stored preferences, defaults when absent.
pub async fn get_preferences(
    State(state): State<AppState>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let preferences = state.preferences_service.get(&state.default_user).await?;
    Ok(Json(PreferencesResponse { preferences }))
}

/// POST /api/preferences - upsert.
pub async fn save_preferences(
    State(state): State<AppState>,
    Json(body): Json<PreferencesPayload>,
) -> Result<Json<MessageResponse>, ApiError> {
    let tone = body
        .tone
        .as_deref()
        .map(str::parse::<Tone>)
        .transpose()
        .map_err(ApiError::InvalidInput)?;

    let update = PreferencesUpdate {
        interests: body.interests,
        tone,
        post_count: body.post_count.map(|n| n.clamp(1, 10) as u8),
    };

    state
        .preferences_service
        .save(&state.default_user, update)
        .await?;

    Ok(Json(MessageResponse {
        message: "Preferences saved successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_state;

    #[tokio::test]
    async fn test_defaults_before_any_save() {
        let state = memory_state().await;
        let response = get_preferences(State(state)).await.unwrap();
        assert_eq!(response.0.preferences.post_count, 5);
        assert_eq!(response.0.preferences.tone, Tone::Professional);
    }

    #[tokio::test]
    async fn test_save_then_get() {
        let state = memory_state().await;

        save_preferences(
            State(state.clone()),
            Json(PreferencesPayload {
                interests: Some(vec!["rust".to_string(), "coffee".to_string()]),
                tone: Some("casual".to_string()),
                post_count: Some(3),
            }),
        )
        .await
        .unwrap();

        let response = get_preferences(State(state)).await.unwrap();
        assert_eq!(response.0.preferences.interests, vec!["rust", "coffee"]);
        assert_eq!(response.0.preferences.tone, Tone::Casual);
        assert_eq!(response.0.preferences.post_count, 3);
    }

    #[tokio::test]
    async fn test_sixth_interest_dropped() {
        let state = memory_state().await;
        let six: Vec<String> = (1..=6).map(|i| format!("tag{i}")).collect();

        save_preferences(
            State(state.clone()),
            Json(PreferencesPayload {
                interests: Some(six),
                tone: None,
                post_count: None,
            }),
        )
        .await
        .unwrap();

        let stored = get_preferences(State(state)).await.unwrap();
        assert_eq!(stored.0.preferences.interests.len(), 5);
        assert_eq!(stored.0.preferences.interests.last().unwrap(), "tag5");
    }

    #[tokio::test]
    async fn test_unknown_tone_rejected() {
        let state = memory_state().await;
        let err = save_preferences(
            State(state),
            Json(PreferencesPayload {
                interests: None,
                tone: Some("sarcastic".to_string()),
                post_count: None,
            }),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_post_count_clamped() {
        let state = memory_state().await;
        save_preferences(
            State(state.clone()),
            Json(PreferencesPayload {
                interests: None,
                tone: None,
                post_count: Some(500),
            }),
        )
        .await
        .unwrap();

        let stored = get_preferences(State(state)).await.unwrap();
        assert_eq!(stored.0.preferences.post_count, 10);
    }
}
