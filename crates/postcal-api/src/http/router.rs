//! Axum router configuration with middleware.
//!
//! Routes match the original wire surface (no version prefix).
//! Middleware: CORS (fully open; single-user tool) and request tracing.

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/generate-posts", post(handlers::generate::generate_posts))
        .route("/save-post", post(handlers::post::save_post))
        .route("/saved-posts", get(handlers::post::list_saved_posts))
        .route("/saved-posts/{id}", delete(handlers::post::delete_saved_post))
        .route(
            "/preferences",
            get(handlers::preferences::get_preferences)
                .post(handlers::preferences::save_preferences),
        )
        .route("/schedule-post", post(handlers::schedule::schedule_post))
        .route(
            "/scheduled-posts",
            get(handlers::schedule::list_scheduled_posts),
        )
        .route(
            "/scheduled-posts/{id}",
            delete(handlers::schedule::delete_scheduled_post),
        );

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(handlers::health::health_check))
        .route("/", get(handlers::health::root))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
