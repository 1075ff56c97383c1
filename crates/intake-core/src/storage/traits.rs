//! Storage trait definition.
//!
//! The `IntakeStore` trait defines the interface that storage backends
//! implement. The ledger holds one store and layers change notification on
//! top of it; backends know nothing about observers.

use std::path::Path;
use uuid::Uuid;

use super::types::{IntakeRecord, LedgerMetadata, NewRecord};
use crate::error::Result;

/// Durable, append-only storage for intake records.
///
/// All implementations must ensure:
/// - `append` has committed durably before it returns `Ok`
/// - Records are never updated or removed
/// - `records_ascending` returns records ordered by timestamp, ties broken
///   by insertion order
pub trait IntakeStore {
    /// Create a new ledger at the specified path.
    ///
    /// # Returns
    ///
    /// Returns the device ID recorded in the new ledger's metadata.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::AlreadyExists` if a file is already present at
    /// `path`, or a storage error if the file cannot be written.
    fn create(path: &Path) -> Result<Uuid>
    where
        Self: Sized;

    /// Open an existing ledger.
    ///
    /// # Errors
    ///
    /// Returns `IntakeError::LedgerNotFound` if the file is missing, or a
    /// storage error if the file is not a ledger.
    fn open(path: &Path) -> Result<Self>
    where
        Self: Sized;

    /// Get ledger metadata.
    fn metadata(&self) -> Result<LedgerMetadata>;

    /// Append a record.
    ///
    /// The stored timestamp never precedes the newest stored record, so a
    /// clock stepping backwards cannot reorder the ledger.
    ///
    /// # Returns
    ///
    /// Returns the record exactly as stored.
    fn append(&mut self, record: &NewRecord) -> Result<IntakeRecord>;

    /// All records, oldest first.
    fn records_ascending(&self) -> Result<Vec<IntakeRecord>>;

    /// Number of stored records.
    fn record_count(&self) -> Result<usize>;

    /// Check ledger integrity.
    ///
    /// Verifies:
    /// - SQLite page-level integrity
    /// - Metadata keys are present
    /// - Stored timestamps parse and never decrease in insertion order
    fn check_integrity(&self) -> Result<()>;

    /// Write a consistent copy of the ledger to `destination`.
    fn backup_to(&self, destination: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_definition_compiles() {
        fn _accepts_store<T: IntakeStore>(_store: T) {}
    }
}
