//! Saved-post handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use postcal_types::post::{IncomingPost, Post, PostId};

use crate::http::error::ApiError;
use crate::state::AppState;

/// Request body for POST /api/save-post.
#[derive(Debug, Default, Deserialize)]
pub struct SavePostRequest {
    pub post: Option<IncomingPost>,
}

#[derive(Debug, Serialize)]
pub struct SavePostResponse {
    pub post: Post,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SavedPostsResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/save-post - persist a generated candidate.
pub async fn save_post(
    State(state): State<AppState>,
    Json(body): Json<SavePostRequest>,
) -> Result<Json<SavePostResponse>, ApiError> {
    let incoming = body
        .post
        .ok_or_else(|| ApiError::InvalidInput("Post content is required".to_string()))?;
    let content = incoming.content.as_deref().unwrap_or("");

    let post = state
        .post_service
        .save(&state.default_user, content, incoming.topic.as_deref())
        .await?;

    Ok(Json(SavePostResponse {
        post,
        message: "Post saved successfully".to_string(),
    }))
}

/// GET /api/saved-posts - list persisted posts, newest first.
pub async fn list_saved_posts(
    State(state): State<AppState>,
) -> Result<Json<SavedPostsResponse>, ApiError> {
    let posts = state.post_service.list(&state.default_user).await?;
    Ok(Json(SavedPostsResponse { posts }))
}

/// DELETE /api/saved-posts/:id - delete a post and its assignments.
pub async fn delete_saved_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let post_id = id
        .parse::<PostId>()
        .map_err(|_| ApiError::NotFound("Post not found".to_string()))?;

    state.post_service.delete(&state.default_user, &post_id).await?;

    Ok(Json(MessageResponse {
        message: "Post deleted successfully".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_state;

    fn incoming(content: &str) -> SavePostRequest {
        SavePostRequest {
            post: Some(IncomingPost {
                id: Some("cand_123".to_string()),
                content: Some(content.to_string()),
                topic: Some("rust".to_string()),
            }),
        }
    }

    #[tokio::test]
    async fn test_save_then_list() {
        let state = memory_state().await;

        let saved = save_post(State(state.clone()), Json(incoming("hello world")))
            .await
            .unwrap();
        assert_eq!(saved.0.post.content, "hello world");
        assert_eq!(saved.0.post.character_count, 11);

        let listed = list_saved_posts(State(state)).await.unwrap();
        assert_eq!(listed.0.posts.len(), 1);
    }

    #[tokio::test]
    async fn test_save_without_payload_rejected() {
        let state = memory_state().await;
        let err = save_post(State(state), Json(SavePostRequest::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found() {
        let state = memory_state().await;

        // Both a well-formed unknown UUID and a garbage id are 404s.
        let err = delete_saved_post(
            State(state.clone()),
            Path(PostId::new().to_string()),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));

        let err = delete_saved_post(State(state), Path("not-a-uuid".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_removes_post() {
        let state = memory_state().await;
        let saved = save_post(State(state.clone()), Json(incoming("short lived")))
            .await
            .unwrap();

        delete_saved_post(State(state.clone()), Path(saved.0.post.id.to_string()))
            .await
            .unwrap();

        let listed = list_saved_posts(State(state)).await.unwrap();
        assert!(listed.0.posts.is_empty());
    }
}
