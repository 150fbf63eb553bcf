//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle user registration and login. They are designed to
//! be merged into the main Axum router.

use axum::routing::post;
use axum::Router;

use crate::auth::handlers;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(handlers::register))
        .route("/api/auth/login", post(handlers::login))
}
