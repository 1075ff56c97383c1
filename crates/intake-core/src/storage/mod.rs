//! Storage layer: the store trait, its data types, and the SQLite backend.

mod sqlite;
pub mod traits;
pub mod types;

pub use sqlite::SqliteStore;
pub use traits::IntakeStore;
pub use types::{IntakeRecord, LedgerMetadata, NewRecord};
