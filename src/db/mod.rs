//! In-memory store with connection pooling
//!
//! This module is organized by domain:
//! - `users` - user directory operations
//! - `expenses` - expense record CRUD
//! - `filter` - filtered/sorted transaction views
//!
//! The backing database is SQLite in `mode=memory` with a shared cache, so
//! every pooled connection sees the same data and everything is gone when the
//! pool is dropped. Each `Database` gets its own uniquely-named memory
//! database; two instances never share state.

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod expenses;
mod filter;
mod users;

pub use filter::{ExpenseFilter, FilterResult};

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    // SQLite stores as "YYYY-MM-DD HH:MM:SS" format
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Store wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
}

impl Database {
    /// Open a fresh, empty in-memory store
    ///
    /// The URI carries a per-instance name so concurrently open stores (and
    /// parallel tests) never alias each other's shared-cache database.
    pub fn open() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let uri = format!("file:tally_mem_{}?mode=memory&cache=shared", id);

        let manager = SqliteConnectionManager::file(uri);
        let pool = Pool::builder().max_size(4).build(manager)?;

        let db = Self { pool };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run schema migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- Users (the process-wide user directory)
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                full_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            -- Expense records. `id` is scoped to the owning user; `seq` is a
            -- global insertion counter, so ORDER BY seq DESC reproduces the
            -- most-recently-added-first storage order of each collection.
            -- `date` is ISO YYYY-MM-DD text, which sorts chronologically.
            CREATE TABLE IF NOT EXISTS expenses (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL REFERENCES users(id),
                id INTEGER NOT NULL,
                description TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL,
                notes TEXT NOT NULL DEFAULT '',
                UNIQUE(user_id, id)
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_user ON expenses(user_id);
            CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(user_id, date);
            "#,
        )?;

        info!("Store schema initialized");
        Ok(())
    }
}
