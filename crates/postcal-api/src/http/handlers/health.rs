//! Liveness and readiness handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::state::AppState;

/// GET /health - liveness plus store readiness.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let timestamp = Utc::now().to_rfc3339();
    match state.health.check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "database": "connected",
                "timestamp": timestamp,
            })),
        ),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "database": "disconnected",
                "timestamp": timestamp,
            })),
        ),
    }
}

/// GET / - service banner.
pub async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    let database = match state.health.check().await {
        Ok(()) => "connected",
        Err(_) => "disconnected",
    };
    Json(json!({
        "message": "Postcal API",
        "status": "running",
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
