//! Application-level utilities for the Intake CLI.
//!
//! This module provides:
//! - Path resolution for config and ledger files
//! - A per-invocation context that loads config lazily and opens the ledger

mod context;
mod resolver;

// Re-export public API
pub use context::AppContext;
pub use resolver::{missing_ledger_error, resolve_config_path, resolve_ledger_path};
