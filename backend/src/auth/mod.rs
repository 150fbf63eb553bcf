//! Authentication module for managing user accounts and access control.
//!
//! This module provides the public interface for authentication-related
//! functionality such as registration, login, token management, and the
//! claims extractor that guards protected routes.

pub mod routes;
pub mod handlers;
pub mod models;
pub mod middleware;
pub mod service;
pub mod errors;

// Re-exports for convenience
pub use handlers::*;
pub use models::*;
pub use middleware::*;
pub use routes::*;
pub use service::*;
pub use errors::*;
