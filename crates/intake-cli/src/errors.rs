//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use intake_core::IntakeError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, ledger)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),

    /// Integrity check failed
    IntegrityFailed(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message) => write!(f, "{}", message),
            CliError::IntegrityFailed(message) => write!(f, "Integrity check failed: {}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
            CliError::IntegrityFailed(_) => exit_codes::INTEGRITY_FAILED,
        }
    }
}

/// Lift core errors that have a dedicated exit code into `CliError`.
pub fn classify(err: IntakeError) -> anyhow::Error {
    match err {
        IntakeError::InvalidInput(message) => CliError::invalid_input(message).into(),
        IntakeError::Integrity(message) => CliError::IntegrityFailed(message).into(),
        other => other.into(),
    }
}

/// Exit code for any error returned by a command handler.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CliError>()
        .map(CliError::exit_code)
        .unwrap_or(exit_codes::FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_includes_hint() {
        let err = CliError::not_found("No ledger found", "Hint: Run `intake init`.");
        assert_eq!(err.to_string(), "No ledger found\nHint: Run `intake init`.");
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
    }

    #[test]
    fn test_classify_invalid_input() {
        let err = classify(IntakeError::InvalidInput("bad".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::INVALID_INPUT);
    }

    #[test]
    fn test_classify_integrity() {
        let err = classify(IntakeError::Integrity("Record 2 out of order".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::INTEGRITY_FAILED);
        assert!(err.to_string().contains("Record 2"));
    }

    #[test]
    fn test_other_errors_use_general_failure() {
        let err = classify(IntakeError::Storage("disk".to_string()));
        assert_eq!(exit_code_for(&err), exit_codes::FAILURE);
    }
}
