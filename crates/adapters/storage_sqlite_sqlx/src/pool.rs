//! Opens the customer store: pool sizing, file creation and schema migrations.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::error::StorageError;

/// Pool size used when the caller does not pick one.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Where the customer store lives and how many connections it may hold.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx URL, e.g. `sqlite:crm.db?mode=rwc` or `sqlite::memory:`.
    pub database_url: String,
    /// Upper bound on pooled connections. Must be non-zero.
    pub max_connections: u32,
}

impl Config {
    /// Point at `database_url` with the default pool size.
    #[must_use]
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }

    #[must_use]
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }

    /// Open the pool and bring the `customers` schema up to date.
    ///
    /// The database file is created when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the URL is malformed, the connection
    /// fails, or a migration cannot be applied.
    pub async fn build(self) -> Result<Database, StorageError> {
        let options = SqliteConnectOptions::from_str(&self.database_url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(self.max_connections)
            .connect_with(options)
            .await?;
        tracing::debug!(max_connections = self.max_connections, "customer store opened");

        Database::migrate(pool).await
    }
}

/// Migrated connection pool backing the customer repository.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    async fn migrate(pool: SqlitePool) -> Result<Self, StorageError> {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::debug!("database migrations applied");
        Ok(Self { pool })
    }

    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
