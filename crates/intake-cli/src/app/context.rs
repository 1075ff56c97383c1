//! Application context for the Intake CLI.
//!
//! Provides a unified context that combines CLI arguments with
//! lazily-loaded configuration.

use std::path::PathBuf;

use once_cell::unsync::OnceCell;

use intake_core::{IntakeError, IntakeLedger};

use crate::cli::Cli;
use crate::config::{read_config, IntakeConfig, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::errors::CliError;
use crate::helpers::parse_timezone;
use crate::ui::{TimeDisplay, UiContext};

use super::resolver::{missing_ledger_error, resolve_config_path, resolve_ledger_path};

/// Application context that bundles CLI args with configuration.
///
/// This avoids repeatedly loading config and threading multiple parameters
/// through handler functions.
pub struct AppContext<'a> {
    cli: &'a Cli,
    config: OnceCell<Option<IntakeConfig>>,
}

impl<'a> AppContext<'a> {
    /// Create a new application context from CLI arguments.
    pub fn new(cli: &'a Cli) -> Self {
        Self {
            cli,
            config: OnceCell::new(),
        }
    }

    /// Get the CLI arguments.
    pub fn cli(&self) -> &Cli {
        self.cli
    }

    /// Check if quiet mode is enabled.
    pub fn quiet(&self) -> bool {
        self.cli.quiet
    }

    /// Get the config file contents, loading them lazily. `None` when no
    /// config file exists.
    pub fn config(&self) -> anyhow::Result<Option<&IntakeConfig>> {
        self.config
            .get_or_try_init(|| {
                let path = resolve_config_path()?;
                if path.exists() {
                    read_config(&path).map(Some)
                } else {
                    Ok(None)
                }
            })
            .map(Option::as_ref)
    }

    /// Resolve the ledger path from flags, environment, or config.
    pub fn ledger_path(&self) -> anyhow::Result<PathBuf> {
        let config_path = resolve_config_path()?;
        resolve_ledger_path(self.cli, self.config()?, &config_path)
    }

    /// Open the ledger, mapping a missing file to a not-found error with a hint.
    pub fn open_ledger(&self) -> anyhow::Result<IntakeLedger> {
        let path = self.ledger_path()?;
        match IntakeLedger::open(&path) {
            Ok(ledger) => Ok(ledger),
            Err(IntakeError::LedgerNotFound) => Err(missing_ledger_error(&path)),
            Err(err) => Err(anyhow::Error::new(err)
                .context(format!("Failed to open ledger at {}", path.display()))),
        }
    }

    /// How timestamps are shown, from the `[ui]` config section.
    pub fn time_display(&self) -> anyhow::Result<TimeDisplay> {
        let ui = self.config()?.map(|config| &config.ui);
        let timezone = match ui.and_then(|ui| ui.timezone.as_deref()) {
            Some(value) => parse_timezone(value)
                .map_err(|e| anyhow::anyhow!("Invalid [ui] timezone in config: {}", e))?,
            None => None,
        };
        let format = ui.and_then(|ui| ui.date_format.clone());
        Ok(TimeDisplay::new(timezone, format))
    }

    /// Chart dimensions: flags first, then config, then defaults.
    pub fn chart_size(
        &self,
        width: Option<usize>,
        height: Option<usize>,
    ) -> anyhow::Result<(usize, usize)> {
        let chart = self.config()?.map(|config| &config.chart);
        let width = width
            .or_else(|| chart.map(|c| c.width))
            .unwrap_or(DEFAULT_CHART_WIDTH);
        let height = height
            .or_else(|| chart.map(|c| c.height))
            .unwrap_or(DEFAULT_CHART_HEIGHT);
        if width < 2 || height < 2 {
            return Err(CliError::invalid_input(format!(
                "Chart must be at least 2x2 (got {}x{})",
                width, height
            ))
            .into());
        }
        Ok((width, height))
    }

    /// Build a UI context for a command's output flags.
    pub fn ui_context(&self, json: bool, format: Option<&str>, ascii: bool) -> UiContext {
        UiContext::from_env(json, format, self.cli.no_color, ascii)
    }
}
