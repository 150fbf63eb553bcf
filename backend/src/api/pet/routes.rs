//! Defines the HTTP routes for the pet listing API.
//!
//! These routes map the pet API paths to handler functions for browsing,
//! creating, updating, and removing pet records. The create route accepts
//! multipart uploads, so the body limit is raised beyond Axum's default.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;

use super::handlers;
use crate::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/pets",
            get(handlers::list_pets).post(handlers::create_pet),
        )
        .route(
            "/api/pets/{id}",
            get(handlers::get_pet)
                .put(handlers::update_pet)
                .delete(handlers::delete_pet),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
