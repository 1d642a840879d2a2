//! Candidate-generation handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use postcal_types::generate::CandidatePost;

use crate::http::error::ApiError;
use crate::state::AppState;

/// Request body for POST /api/generate-posts.
///
/// The original client sent the field as `interests`; both names are
/// accepted.
#[derive(Debug, Default, Deserialize)]
pub struct GeneratePostsRequest {
    #[serde(alias = "interests")]
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratePostsResponse {
    pub posts: Vec<CandidatePost>,
}

/// POST /api/generate-posts - draft candidates for a topic.
///
/// Generation itself cannot fail: provider errors take the template
/// fallback inside the generator. Only a missing topic is an error.
pub async fn generate_posts(
    State(state): State<AppState>,
    Json(body): Json<GeneratePostsRequest>,
) -> Result<Json<GeneratePostsResponse>, ApiError> {
    let topic = body.topic.unwrap_or_default();
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(ApiError::InvalidInput("Topic is required".to_string()));
    }

    let preferences = state.preferences_service.get(&state.default_user).await?;
    let posts = state.generator.generate(topic, &preferences).await;

    Ok(Json(GeneratePostsResponse { posts }))
}
