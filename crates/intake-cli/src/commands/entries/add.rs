//! `intake add`: append one record and report it.

use std::io::IsTerminal;

use intake_core::{parse_calories_strict, ChartProjection, IntakeRecord};

use crate::app::AppContext;
use crate::cli::AddArgs;
use crate::errors::classify;
use crate::helpers::{calories_from_text, confirm_retry, read_calories_text};
use crate::ui::{area_chart, badge, print, receipt, Badge, TimeDisplay};

pub fn handle_add(ctx: &AppContext, args: &AddArgs) -> anyhow::Result<()> {
    let mut ledger = ctx.open_ledger()?;
    let ui = ctx.ui_context(false, None, false);
    let interactive = std::io::stdin().is_terminal() && !args.no_input;

    let text = read_calories_text(args.calories.as_deref(), args.no_input)?;
    let calories = calories_from_text(&text, args.strict)?;
    if parse_calories_strict(&text).is_err() && !ctx.quiet() {
        eprintln!(
            "{}",
            badge(
                &ui,
                Badge::Warn,
                &format!("\"{}\" is not a whole number; logging 0", text.trim())
            )
        );
    }

    let display = ctx.time_display()?;
    let chart = if args.chart {
        let (width, height) = ctx.chart_size(None, None)?;
        let (projection, _) = ChartProjection::attach(&mut ledger);
        Some((projection, width, height))
    } else {
        None
    };

    let record = loop {
        match ledger.add(calories) {
            Ok(record) => break record,
            Err(err) if interactive => {
                eprintln!("{}", badge(&ui, Badge::Err, &format!("Could not save: {}", err)));
                if !confirm_retry("Try again?")? {
                    return Err(classify(err));
                }
            }
            Err(err) => return Err(classify(err)),
        }
    };
    // Committed. Nothing below may fail the command.
    let count = match ledger.len() {
        Ok(count) => Some(count),
        Err(err) => {
            tracing::warn!(error = %err, "could not count records after add");
            None
        }
    };
    tracing::debug!(calories = record.calories, ?count, "record added");

    if ctx.quiet() {
        return Ok(());
    }
    print(
        &ui,
        &receipt(&ui, "Added", &receipt_items(&record, &display, count)),
    );

    if let Some((projection, width, height)) = chart {
        let projection = projection.borrow();
        for line in area_chart(&ui, projection.series(), width, height) {
            print(&ui, &line);
        }
    }
    Ok(())
}

/// Receipt lines for a saved record. The count is left out when it could
/// not be read.
fn receipt_items(
    record: &IntakeRecord,
    display: &TimeDisplay,
    count: Option<usize>,
) -> Vec<(&'static str, String)> {
    let mut items = vec![
        ("Calories", record.calories.to_string()),
        ("When", display.format(&record.timestamp)),
    ];
    if let Some(count) = count {
        items.push(("Records", count.to_string()));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record() -> IntakeRecord {
        IntakeRecord {
            calories: 450,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 0).unwrap(),
        }
    }

    #[test]
    fn test_receipt_items_with_count() {
        let display = TimeDisplay::new(Some(chrono_tz::UTC), None);
        let keys: Vec<&str> = receipt_items(&record(), &display, Some(3))
            .iter()
            .map(|(key, _)| *key)
            .collect();
        assert_eq!(keys, vec!["Calories", "When", "Records"]);
    }

    #[test]
    fn test_receipt_items_without_count_still_reports_record() {
        let display = TimeDisplay::new(Some(chrono_tz::UTC), None);
        let items = receipt_items(&record(), &display, None);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0], ("Calories", "450".to_string()));
        assert_eq!(items[1].1, "3/5/24, 2:07 PM");
    }
}
