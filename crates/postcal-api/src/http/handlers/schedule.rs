//! Scheduling handlers.

use axum::extract::{Path, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use postcal_types::post::IncomingPost;
use postcal_types::schedule::{ScheduleId, ScheduledPostView, TimeSlot};

use crate::http::error::ApiError;
use crate::http::handlers::post::MessageResponse;
use crate::state::AppState;

/// Request body for POST /api/schedule-post.
///
/// Date and time arrive as strings so a malformed value surfaces as a
/// structured 400 rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct SchedulePostRequest {
    pub post: Option<IncomingPost>,
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePostResponse {
    pub scheduled_post: ScheduledPostView,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPostsResponse {
    pub scheduled_posts: Vec<ScheduledPostView>,
}

/// POST /api/schedule-post - bind a post to a calendar slot.
pub async fn schedule_post(
    State(state): State<AppState>,
    Json(body): Json<SchedulePostRequest>,
) -> Result<Json<SchedulePostResponse>, ApiError> {
    let (Some(incoming), Some(date), Some(time)) = (body.post, body.date, body.time) else {
        return Err(ApiError::InvalidInput(
            "Post, date, and time are required".to_string(),
        ));
    };

    let date: NaiveDate = date
        .trim()
        .parse()
        .map_err(|_| ApiError::InvalidInput(format!("invalid date: '{date}'")))?;
    let slot: TimeSlot = time.parse().map_err(ApiError::InvalidInput)?;

    let view = state
        .schedule_service
        .assign(&state.default_user, incoming, date, slot)
        .await?;

    Ok(Json(SchedulePostResponse {
        scheduled_post: view,
        message: "Post scheduled successfully".to_string(),
    }))
}

/// GET /api/scheduled-posts - the calendar, date then band order.
pub async fn list_scheduled_posts(
    State(state): State<AppState>,
) -> Result<Json<ScheduledPostsResponse>, ApiError> {
    let scheduled_posts = state.schedule_service.list(&state.default_user).await?;
    Ok(Json(ScheduledPostsResponse { scheduled_posts }))
}

/// DELETE /api/scheduled-posts/:id - unassign.
pub async fn delete_scheduled_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let schedule_id = id
        .parse::<ScheduleId>()
        .map_err(|_| ApiError::NotFound("Scheduled post not found".to_string()))?;

    state
        .schedule_service
        .unassign(&state.default_user, &schedule_id)
        .await?;

    Ok(Json(MessageResponse {
        message: "Scheduled post deleted successfully".to_string(),
    }))
}
