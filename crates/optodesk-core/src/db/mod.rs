//! Database layer for optodesk.
//!
//! There is no table per record type. Patients, bills, reference data and
//! health conditions all live in one SQLite `documents` table as JSON object
//! bodies, keyed by ([`Collection`], UUID) and listed in insertion order.
//! Record shapes are owned by the serde models, so adding a field never
//! needs a migration; the schema only guards that bodies are JSON objects.
//! The typed accessors in `patients`, `bills` and `reference` wrap the
//! generic document operations.

mod schema;
mod documents;
mod patients;
mod bills;
mod reference;

pub use schema::*;
pub use documents::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Record not found: {0}")]
    NotFound(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let db = Self::with_schema(Connection::open(path.as_ref())?)?;
        tracing::info!(
            event = "core.db.open_completed",
            path = %path.as_ref().display()
        );
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        Self::with_schema(Connection::open_in_memory()?)
    }

    /// Wrap a connection, creating the documents table if missing.
    fn with_schema(conn: Connection) -> DbResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Get raw connection (for advanced queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}
