//! Error types for Intake core operations.
//!
//! This module defines the error hierarchy for all core operations.
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-friendly messages and exit codes.

use thiserror::Error;

/// Result type alias for Intake operations.
pub type Result<T> = std::result::Result<T, IntakeError>;

/// Core error type for Intake operations.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Ledger file does not exist
    #[error("Ledger not found")]
    LedgerNotFound,

    /// Ledger file already exists at the create path
    #[error("Ledger file already exists")]
    AlreadyExists,

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Integrity check failure
    #[error("Integrity check failed: {0}")]
    Integrity(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
