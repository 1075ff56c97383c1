//! Input and parsing helper functions for the CLI.
//!
//! This module provides utilities for:
//! - Reading typed calorie amounts from arguments, prompts, or stdin (`input`)
//! - Calorie, timezone, and format parsing (`parsing`)

mod input;
mod parsing;

// Re-export public API
pub use input::{confirm_retry, read_calories_text};
pub use parsing::{calories_from_text, parse_output_format, parse_timezone, OutputFormat};
