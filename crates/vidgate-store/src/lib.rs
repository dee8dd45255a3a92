//! Persistence layer for vidgate
//!
//! Provides:
//! - Watch-history ledger (append-only; the single source of truth for the
//!   daily budget)
//! - Video catalog (availability, ban flags, duplicate-source collapsing)

mod events;
mod sqlite;
mod traits;

pub use events::*;
pub use sqlite::*;
pub use traits::*;

use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Database(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;
