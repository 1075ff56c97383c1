//! `intake init`: create the ledger database and write the config file.

use std::path::PathBuf;

use intake_core::{IntakeError, IntakeLedger};

use crate::app::{resolve_config_path, AppContext};
use crate::cli::InitArgs;
use crate::config::{default_ledger_path, write_config, IntakeConfig};
use crate::errors::CliError;
use crate::helpers::parse_timezone;
use crate::ui::{hint, print, receipt};

pub fn handle_init(ctx: &AppContext, args: &InitArgs) -> anyhow::Result<()> {
    let ledger_path = match args.path.as_deref().or(ctx.cli().ledger.as_deref()) {
        Some(path) => PathBuf::from(path),
        None => default_ledger_path()?,
    };
    let timezone = match args.timezone.as_deref() {
        Some(value) => parse_timezone(value)
            .map_err(|e| CliError::invalid_input(e.to_string()))?
            .map(|tz| tz.name().to_string()),
        None => None,
    };

    let config_path = resolve_config_path()?;
    if config_path.exists() && !args.force {
        return Err(CliError::invalid_input(format!(
            "Config already exists at {}\nHint: Pass --force to overwrite it.",
            config_path.display()
        ))
        .into());
    }

    if let Some(parent) = ledger_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            anyhow::anyhow!(
                "Failed to create ledger directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    let (device_id, reused) = match IntakeLedger::create(&ledger_path) {
        Ok(device_id) => (device_id, false),
        Err(IntakeError::AlreadyExists) if args.force => {
            let ledger = IntakeLedger::open(&ledger_path).map_err(|e| {
                anyhow::anyhow!(
                    "Existing file at {} is not usable: {}",
                    ledger_path.display(),
                    e
                )
            })?;
            (ledger.metadata()?.device_id, true)
        }
        Err(IntakeError::AlreadyExists) => {
            return Err(CliError::invalid_input(format!(
                "Ledger already exists at {}\nHint: Pass --force to keep it and rewrite the config.",
                ledger_path.display()
            ))
            .into());
        }
        Err(err) => {
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to create ledger at {}", ledger_path.display())));
        }
    };
    tracing::debug!(path = %ledger_path.display(), reused, "ledger ready");

    let config = IntakeConfig::new(ledger_path.clone(), timezone.clone());
    write_config(&config_path, &config)?;

    if ctx.quiet() {
        return Ok(());
    }
    let ui = ctx.ui_context(false, None, false);
    let title = if reused {
        "Using existing ledger"
    } else {
        "Initialized ledger"
    };
    let device = device_id.to_string();
    print(
        &ui,
        &receipt(
            &ui,
            title,
            &[
                ("Ledger", ledger_path.display().to_string()),
                ("Config", config_path.display().to_string()),
                ("Timezone", timezone.unwrap_or_else(|| "auto".to_string())),
                ("Device", device[..8].to_string()),
            ],
        ),
    );
    print(&ui, &hint(&ui, "intake add 450"));
    Ok(())
}
