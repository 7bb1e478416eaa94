pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{engagement, feed, journal, music, suggestions, upload};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Content feed
        .route("/api/v1/feed", get(feed::handlers::handle_feed))
        // Engagement
        .route(
            "/api/v1/content/:id/likes",
            post(engagement::handlers::handle_like),
        )
        .route(
            "/api/v1/content/:id/comments",
            post(engagement::handlers::handle_comment),
        )
        .route(
            "/api/v1/content/:id/shares",
            post(engagement::handlers::handle_share),
        )
        .route(
            "/api/v1/content/:id/saves",
            post(engagement::handlers::handle_save),
        )
        // Media upload
        .route(
            "/api/v1/upload/:visibility",
            post(upload::handlers::handle_upload),
        )
        // Mood music
        .route(
            "/api/v1/music/suggestions",
            get(music::handlers::handle_suggestions),
        )
        // Journal
        .route(
            "/api/v1/notes",
            post(journal::handlers::handle_create_note).get(journal::handlers::handle_list_notes),
        )
        .route("/api/v1/saved", get(journal::handlers::handle_list_saved))
        .route(
            "/api/v1/checkins",
            post(journal::handlers::handle_create_checkin),
        )
        .route("/api/v1/progress", get(journal::handlers::handle_progress))
        // AI suggestions
        .route(
            "/api/v1/suggestions",
            get(suggestions::handlers::handle_suggestions),
        )
        .with_state(state)
}
