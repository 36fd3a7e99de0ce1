//! Router assembly.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Maximum accepted request body (PDF uploads included).
const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;

/// Build the API router for the given state.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/add-document", post(handlers::add_document))
        .route("/upload-pdf", post(handlers::upload_pdf))
        .route("/query", post(handlers::query))
        .route("/clear-database", delete(handlers::clear_database))
        .route("/stats", get(handlers::stats))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
