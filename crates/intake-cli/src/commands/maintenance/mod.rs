//! Ledger maintenance handlers.

mod backup;
mod check;

pub use backup::handle_backup;
pub use check::handle_check;
