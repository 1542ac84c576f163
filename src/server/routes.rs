//! Router configuration for the web server.

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use super::handlers;
use super::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/summarize",
            get(handlers::summarize_form).post(handlers::summarize_submit),
        )
        .route("/qa", get(handlers::qa_form).post(handlers::qa_submit))
        .route("/health", get(handlers::health))
        .layer(body_limit)
        .with_state(state)
}
