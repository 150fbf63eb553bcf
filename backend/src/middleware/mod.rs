//! General-purpose middleware for the API.
//!
//! This module contains reusable middleware components that apply across
//! the whole Axum router rather than to a single API domain.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS for browser front ends. Tokens travel in the
/// Authorization header, never in cookies, so credentials stay disabled.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
