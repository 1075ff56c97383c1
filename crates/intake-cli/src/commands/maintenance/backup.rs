use std::io::IsTerminal;
use std::path::Path;

use crate::app::AppContext;
use crate::cli::BackupArgs;
use crate::ui::{print, receipt};

pub fn handle_backup(ctx: &AppContext, args: &BackupArgs) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let destination = Path::new(&args.destination);

    if std::io::stdin().is_terminal() && !ctx.quiet() && destination.exists() {
        let proceed = dialoguer::Confirm::new()
            .with_prompt(format!("Overwrite {}?", destination.display()))
            .default(false)
            .interact()?;
        if !proceed {
            return Err(anyhow::anyhow!("Backup cancelled"));
        }
    }

    ledger.backup_to(destination).map_err(|e| {
        anyhow::Error::new(e).context(format!("Backup to {} failed", destination.display()))
    })?;

    if !ctx.quiet() {
        let ui = ctx.ui_context(false, None, false);
        print(
            &ui,
            &receipt(
                &ui,
                "Backed up ledger",
                &[
                    ("Destination", destination.display().to_string()),
                    ("Records", ledger.len()?.to_string()),
                ],
            ),
        );
    }
    Ok(())
}
