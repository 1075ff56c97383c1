use intake_core::IntakeError;

use crate::app::AppContext;
use crate::errors::{classify, CliError};
use crate::ui::{badge, kv, print, Badge};

pub fn handle_check(ctx: &AppContext) -> anyhow::Result<()> {
    let ledger = ctx.open_ledger()?;
    let ui = ctx.ui_context(false, None, false);

    match ledger.check_integrity() {
        Ok(()) => {
            if !ctx.quiet() {
                let metadata = ledger.metadata()?;
                print(&ui, &badge(&ui, Badge::Ok, "Integrity check passed"));
                print(&ui, &kv(&ui, "Records", &ledger.len()?.to_string()));
                print(&ui, &kv(&ui, "Format", &metadata.format_version));
                print(
                    &ui,
                    &kv(&ui, "Last modified", &metadata.last_modified.to_rfc3339()),
                );
            }
            Ok(())
        }
        Err(IntakeError::Sqlite { source }) => Err(CliError::IntegrityFailed(format!(
            "{}\nHint: Restore from a backup made with `intake backup`.",
            source
        ))
        .into()),
        Err(err) => Err(classify(err)),
    }
}
