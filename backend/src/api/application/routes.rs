//! Defines the HTTP routes for the adoption application API.
//!
//! These routes map the application API paths to handler functions for
//! submitting, listing, inspecting, updating, and withdrawing adoption
//! applications.

use axum::routing::get;
use axum::Router;

use super::handlers;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/applications",
            get(handlers::list_applications).post(handlers::create_application),
        )
        .route(
            "/api/applications/{id}",
            get(handlers::get_application)
                .put(handlers::update_application)
                .delete(handlers::delete_application),
        )
}
