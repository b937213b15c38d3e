//! SQLite connection pool wrapper for the storage crate.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

/// Manages a single SQLite pool; creates DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL.
    ///
    /// Accepts a `sqlite:` URL (including `sqlite::memory:`) or a plain file path. In-memory
    /// databases are private to one connection, so their pool holds exactly one that never expires.
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!(database_url, "Initializing SQLite pool");

        let in_memory = database_url.contains(":memory:");
        let options = if database_url.starts_with("sqlite:") {
            SqliteConnectOptions::from_str(database_url)?
        } else {
            SqliteConnectOptions::new().filename(database_url)
        }
        .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().max_connections(5);
        if in_memory {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }
        let pool = pool_options.connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
