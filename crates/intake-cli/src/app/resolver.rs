//! Path resolution for config and ledger files.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::config::{default_config_path, IntakeConfig};
use crate::errors::CliError;

/// Resolve the config file path, checking INTAKE_CONFIG env var first.
pub fn resolve_config_path() -> anyhow::Result<PathBuf> {
    if let Ok(value) = std::env::var("INTAKE_CONFIG") {
        if !value.trim().is_empty() {
            return Ok(PathBuf::from(value));
        }
    }
    default_config_path()
}

/// Resolve the ledger file path from CLI args or config.
///
/// `--ledger` (or `INTAKE_PATH`) wins over the config file.
pub fn resolve_ledger_path(
    cli: &Cli,
    config: Option<&IntakeConfig>,
    config_path: &Path,
) -> anyhow::Result<PathBuf> {
    if let Some(path) = cli.ledger.as_deref() {
        return Ok(PathBuf::from(path));
    }

    match config {
        Some(config) => Ok(PathBuf::from(&config.ledger.path)),
        None => Err(CliError::not_found(
            format!("No config found at {}", config_path.display()),
            "Hint: Run `intake init`, or pass --ledger /path/to/intake.db.",
        )
        .into()),
    }
}

/// Error for a ledger path that has no file behind it.
pub fn missing_ledger_error(path: &Path) -> anyhow::Error {
    CliError::not_found(
        format!("No ledger found at {}", path.display()),
        format!(
            "Hint: Run `intake init {}` to create it.",
            path.display()
        ),
    )
    .into()
}
