//! Database module for chirp.
//!
//! Provides SQLite connectivity and schema bootstrap for the account store.

mod account;
mod repository;
mod store;

pub use account::{Account, AccountUpdate, NewAccount};
pub use repository::{new_account_id, AccountRepository};
pub use store::{AccountStore, StoreError};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};

use crate::Result;

/// Account table schema.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS accounts (
    id          TEXT PRIMARY KEY,
    full_name   TEXT NOT NULL,
    email       TEXT NOT NULL UNIQUE,
    password    TEXT NOT NULL,
    profile_pic TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
";

/// Database wrapper for managing the SQLite pool and schema.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database at the given URL.
    ///
    /// The database file is created if it doesn't exist, and the schema is
    /// applied automatically.
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to database at {url}");

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| crate::ChirpError::DatabaseConnection(e.to_string()))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| crate::ChirpError::DatabaseConnection(e.to_string()))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Open an in-memory database for testing.
    pub async fn connect_in_memory() -> Result<Self> {
        debug!("Opening in-memory database");

        // A single connection keeps the in-memory database alive and shared.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| crate::ChirpError::DatabaseConnection(e.to_string()))?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Apply the schema.
    async fn migrate(&self) -> Result<()> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
