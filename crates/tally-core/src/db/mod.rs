//! Database access layer with connection pooling and schema initialization
//!
//! This module is organized by domain:
//! - `categories` - Category listing and seeding
//! - `transactions` - Transaction insert/select/delete and bulk insert
//! - `transaction_filter` - WHERE/ORDER BY builder for transaction queries

use std::path::Path;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::DEFAULT_CATEGORIES;

mod categories;
mod transaction_filter;
mod transactions;

pub use transaction_filter::{FilterResult, TransactionFilter};
pub(crate) use transaction_filter::TRANSACTION_COLUMNS;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Path label used for in-memory stores
pub const MEMORY_PATH: &str = ":memory:";

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file, or `:memory:`
    db_path: String,
}

impl Database {
    /// Open (or create) a file-backed database and initialize its schema
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder().max_size(4).build(manager)?;

        Self::with_pool(pool, path.display().to_string())
    }

    /// Create an in-memory database for one session
    ///
    /// Every SQLite `:memory:` connection is its own database, so the pool
    /// holds exactly one connection that is never recycled.
    pub fn in_memory() -> Result<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .build(manager)?;

        Self::with_pool(pool, MEMORY_PATH.to_string())
    }

    fn with_pool(pool: DbPool, db_path: String) -> Result<Self> {
        let db = Self { pool, db_path };
        db.initialize()?;
        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path == MEMORY_PATH
    }

    /// Get a connection from the pool
    ///
    /// In-memory stores have a single connection: drop it before asking
    /// for another one.
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Create tables if absent and seed the default categories
    ///
    /// Safe to call any number of times. Failures are reported as
    /// [`Error::Init`] since nothing else can run without the schema.
    pub fn initialize(&self) -> Result<()> {
        self.create_schema()
            .and_then(|_| self.seed_categories(&DEFAULT_CATEGORIES[..]))
            .map_err(|e| match e {
                Error::Init(_) => e,
                other => Error::Init(other.to_string()),
            })?;

        info!(path = %self.db_path, "Database schema initialized");
        Ok(())
    }

    fn create_schema(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            PRAGMA foreign_keys = ON;

            -- Categories offered for selection (advisory, not referenced by transactions)
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE CHECK(length(trim(name)) > 0)
            );

            -- Transactions
            CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                type TEXT NOT NULL CHECK(type IN ('income', 'expense')),
                category TEXT NOT NULL,
                amount REAL NOT NULL CHECK(amount >= 0),
                description TEXT DEFAULT '-',
                date TEXT DEFAULT (date('now'))
            );

            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
            CREATE INDEX IF NOT EXISTS idx_transactions_type ON transactions(type);
            CREATE INDEX IF NOT EXISTS idx_transactions_category ON transactions(category);
            "#,
        )?;

        debug!("Schema tables ensured");
        Ok(())
    }
}
