//! Homeward backend library.
//!
//! Wires configuration, the database handle, the auth service, and the
//! image store into the shared application state, and assembles the full
//! Axum router from the per-domain route modules.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use homeward_uploads::{ImageStore, LocalImageStore, UploadError};

use crate::auth::service::AuthService;
use crate::config::Config;
use crate::database::Database;

/// Public URL prefix under which stored images are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<Database>,
    pub auth: Arc<AuthService>,
    pub images: Arc<dyn ImageStore>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, UploadError> {
        let db = Database::new(&config.database_url, config.max_connections);
        let auth = AuthService::new(&config.jwt_secret, config.bcrypt_cost);
        let images = LocalImageStore::new(&config.upload_dir, UPLOADS_PREFIX)?;
        Ok(Self {
            config: Arc::new(config),
            db: Arc::new(db),
            auth: Arc::new(auth),
            images: Arc::new(images),
        })
    }
}

/// Builds the application router with all routes and layers applied.
pub fn app(state: AppState) -> Router {
    let upload_dir = state.config.upload_dir.clone();
    Router::new()
        .route("/", get(root_handler))
        .merge(auth::routes::router())
        .merge(api::shelter::routes::router())
        .merge(api::pet::routes::router())
        .merge(api::application::routes::router())
        .nest_service(UPLOADS_PREFIX, ServeDir::new(upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Homeward API is running"
}
