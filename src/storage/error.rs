//! Storage error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the quote store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Quote text was empty after trimming
    #[error("quote text cannot be empty")]
    Validation,

    /// No quote with this id exists
    #[error("quote {0} was not found")]
    NotFound(i64),

    /// The database file could not be opened or created
    #[error("quote database {} is unavailable: {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Any other SQLite failure
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Errors returned by CSV import and export
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
