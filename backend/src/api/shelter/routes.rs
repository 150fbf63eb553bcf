//! Defines the HTTP routes for the shelter directory.
//!
//! These routes map the shelter API paths to handler functions for
//! listing, fetching, creating, and updating shelter records.

use axum::routing::get;
use axum::Router;

use super::handlers;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/shelters",
            get(handlers::list_shelters).post(handlers::create_shelter),
        )
        .route(
            "/api/shelters/{id}",
            get(handlers::get_shelter).put(handlers::update_shelter),
        )
}
