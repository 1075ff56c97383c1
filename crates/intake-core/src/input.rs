//! Parsing of user-entered calorie amounts.

use crate::error::{IntakeError, Result};

/// Parse a calorie amount, treating anything that is not an integer as `0`.
///
/// Surrounding whitespace is ignored. Empty input, words, decimals and
/// out-of-range numbers all become `0`.
pub fn parse_calories(input: &str) -> i64 {
    input.trim().parse().unwrap_or(0)
}

/// Parse a calorie amount, rejecting anything that is not an integer.
pub fn parse_calories_strict(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    trimmed.parse().map_err(|_| {
        IntakeError::InvalidInput(format!(
            "\"{}\" is not a whole number of calories",
            trimmed
        ))
    })
}
