//! # Intake Core
//!
//! Core library for Intake - a calorie intake log with a running list and
//! an area chart.
//!
//! This crate provides the ledger, its storage, change notification, and the
//! chart projection, independent of any user interface.
//!
//! ## Architecture
//!
//! - **storage**: Store trait and the SQLite backend
//! - **ledger**: Append-only ledger that publishes a change after each add
//! - **observer**: Subscription interface for change notifications
//! - **projection**: Chart series rebuilt from the ledger on every change
//! - **input**: Lenient and strict parsing of typed calorie amounts

pub mod error;
pub mod fs;
pub mod input;
pub mod ledger;
pub mod observer;
pub mod projection;
pub mod storage;

pub use error::{IntakeError, Result};
pub use input::{parse_calories, parse_calories_strict};
pub use ledger::IntakeLedger;
pub use observer::{ChangeObserver, RecordSource, SubscriptionId};
pub use projection::{ChartProjection, SharedProjection};
pub use storage::{IntakeRecord, IntakeStore, LedgerMetadata, NewRecord, SqliteStore};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
