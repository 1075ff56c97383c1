//! `intake chart`: draw the projected series.

use intake_core::ChartProjection;

use crate::app::AppContext;
use crate::cli::ChartArgs;
use crate::output::chart_json;
use crate::ui::{area_chart, hint, print};

pub fn handle_chart(ctx: &AppContext, args: &ChartArgs) -> anyhow::Result<()> {
    let (width, height) = ctx.chart_size(args.width, args.height)?;
    let ledger = ctx.open_ledger()?;

    let mut projection = ChartProjection::new();
    let series = projection.rebuild(&ledger);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chart_json(series))?);
        return Ok(());
    }

    let ui = ctx.ui_context(false, None, args.ascii);
    if series.is_empty() {
        if !ctx.quiet() {
            print(&ui, "Nothing to chart yet.");
            print(&ui, &hint(&ui, "intake add 450"));
        }
        return Ok(());
    }
    for line in area_chart(&ui, series, width, height) {
        println!("{}", line);
    }
    Ok(())
}
