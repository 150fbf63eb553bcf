//! Module for database connection setup and common utilities.
//!
//! This module owns the lazily-initialized connection pool: the first caller
//! runs connection and migrations behind a single-flight cell while
//! concurrent cold callers await the same attempt, and every later call
//! reuses the pooled connections.

pub mod models;
pub mod queries;

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use tokio::sync::OnceCell;
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection-lifecycle handle, shared through application state rather than
/// ambient globals.
#[derive(Debug)]
pub struct Database {
    url: String,
    max_connections: u32,
    pool: OnceCell<SqlitePool>,
}

impl Database {
    pub fn new(url: &str, max_connections: u32) -> Self {
        Self {
            url: url.to_owned(),
            max_connections,
            pool: OnceCell::new(),
        }
    }

    /// Returns the connection pool, establishing it on first use. Safe under
    /// concurrent cold calls: exactly one connect-and-migrate attempt runs
    /// and every caller sees its result. A failed attempt is not memoized,
    /// so a later request can retry.
    pub async fn pool(&self) -> Result<&SqlitePool, sqlx::Error> {
        self.pool.get_or_try_init(|| self.connect()).await
    }

    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    async fn connect(&self) -> Result<SqlitePool, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&self.url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        // Every connection to `:memory:` opens its own empty database, so a
        // memory URL must be pinned to a single long-lived connection.
        let memory = self.url.contains(":memory:") || self.url.contains("mode=memory");
        let mut pool_options =
            SqlitePoolOptions::new().max_connections(if memory { 1 } else { self.max_connections });
        if memory {
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options.connect_with(options).await?;
        MIGRATOR
            .run(&pool)
            .await
            .map_err(|err| sqlx::Error::Migrate(Box::new(err)))?;
        info!(url = %self.url, "database ready");
        Ok(pool)
    }
}

/// True when the error is the store's unique-index rejection, used to turn a
/// duplicate registration into `DuplicateCredential`.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err.as_database_error().map(|db| db.kind()),
        Some(sqlx::error::ErrorKind::UniqueViolation)
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn concurrent_cold_calls_share_one_initialization() {
        let db = Arc::new(Database::new("sqlite::memory:", 4));
        let mut handles = Vec::new();
        for _ in 0..8 {
            let db = Arc::clone(&db);
            handles.push(tokio::spawn(async move { db.pool().await.is_ok() }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }
        assert!(db.is_connected());
    }

    #[tokio::test]
    async fn migrations_leave_the_schema_queryable() {
        let db = Database::new("sqlite::memory:", 1);
        let pool = db.pool().await.unwrap();
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM pets")
            .fetch_one(pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn unsupported_url_surfaces_an_error() {
        let db = Database::new("postgres://nope", 1);
        assert!(db.pool().await.is_err());
        assert!(!db.is_connected());
    }
}
