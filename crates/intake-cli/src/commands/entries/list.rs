//! `intake list`: records oldest first.

use intake_core::RecordSource;

use crate::app::AppContext;
use crate::cli::ListArgs;
use crate::errors::CliError;
use crate::helpers::{parse_output_format, OutputFormat};
use crate::output::{record_line, record_rows, records_json, LIST_COLUMNS};
use crate::ui::{group_thousands, hint, kv, print, simple_table};

pub fn handle_list(ctx: &AppContext, args: &ListArgs) -> anyhow::Result<()> {
    let format = parse_output_format(args.format.as_deref())?;
    if args.json && format.is_some() {
        return Err(CliError::invalid_input("--format cannot be used with --json").into());
    }
    if args.limit == Some(0) {
        return Err(CliError::invalid_input("--limit must be at least 1").into());
    }

    let ledger = ctx.open_ledger()?;
    let mut records = ledger.all_records_ascending()?;
    if let Some(limit) = args.limit {
        let skip = records.len().saturating_sub(limit);
        records = records.split_off(skip);
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records_json(&records))?);
        return Ok(());
    }

    let ui = ctx.ui_context(false, args.format.as_deref(), false);
    if records.is_empty() {
        if !ctx.quiet() {
            print(&ui, "No intakes logged yet.");
            print(&ui, &hint(&ui, "intake add 450"));
        }
        return Ok(());
    }

    let display = ctx.time_display()?;
    let table = match format {
        Some(OutputFormat::Table) => true,
        Some(OutputFormat::Plain) => false,
        None => ui.mode.is_pretty(),
    };
    if table {
        print(
            &ui,
            &simple_table(&ui, &LIST_COLUMNS, &record_rows(&records, &display)),
        );
        if !ctx.quiet() {
            let total: i128 = records.iter().map(|r| i128::from(r.calories)).sum();
            print(&ui, &kv(&ui, "Total", &group_thousands(total)));
        }
    } else {
        for record in &records {
            println!("{}", record_line(record, &display));
        }
    }
    Ok(())
}
