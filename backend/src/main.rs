//! Main entry point for the Homeward backend.
//!
//! This binary loads configuration from the environment, initializes
//! tracing, eagerly connects and migrates the database, and serves the
//! Axum application.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use homeward_backend::config::Config;
use homeward_backend::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homeward_backend=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    let addr = config.listen_addr()?;
    let state = AppState::new(config)?;

    // Connecting up front surfaces bad database configuration at startup
    // instead of on the first request.
    state.db.pool().await?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, app(state)).await?;
    Ok(())
}
