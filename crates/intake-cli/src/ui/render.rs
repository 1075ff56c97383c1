//! Rendering primitives for CLI output.

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table as ComfyTable};

use super::context::UiContext;
use super::theme::{styled, styles, Badge};

/// Render a badge followed by a message.
pub fn badge(ctx: &UiContext, kind: Badge, message: &str) -> String {
    let marker = styled(kind.display(ctx.unicode), kind.style(), ctx.color);
    if message.is_empty() {
        marker
    } else {
        format!("{} {}", marker, message)
    }
}

/// Render a key-value pair.
///
/// Pretty mode: "Key: value" with a dim key.
/// Plain mode: "key=value"
pub fn kv(ctx: &UiContext, key: &str, value: &str) -> String {
    if ctx.mode.is_pretty() {
        let label = styled(&format!("{}:", key), styles::dim(), ctx.color);
        format!("{} {}", label, value)
    } else {
        format!("{}={}", key.to_lowercase().replace(' ', "_"), value)
    }
}

/// Render a hint line.
pub fn hint(ctx: &UiContext, text: &str) -> String {
    if ctx.mode.is_pretty() {
        format!("{} {}", styled("Hint:", styles::dim(), ctx.color), text)
    } else {
        format!("hint={}", text)
    }
}

/// Render the summary block printed after an action.
pub fn receipt(ctx: &UiContext, title: &str, items: &[(&str, String)]) -> String {
    let mut lines = Vec::with_capacity(items.len() + 1);
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Ok, title));
        lines.extend(
            items
                .iter()
                .map(|(key, value)| format!("  {}", kv(ctx, key, value))),
        );
    } else {
        lines.push("status=ok".to_string());
        lines.extend(items.iter().map(|(key, value)| kv(ctx, key, value)));
    }
    lines.join("\n")
}

/// Table column header and alignment.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub align_right: bool,
}

impl Column {
    pub const fn new(header: &'static str) -> Self {
        Self {
            header,
            align_right: false,
        }
    }

    pub const fn right(header: &'static str) -> Self {
        Self {
            header,
            align_right: true,
        }
    }
}

/// Borderless table in pretty mode, space-separated rows otherwise.
pub fn simple_table(ctx: &UiContext, columns: &[Column], rows: &[Vec<String>]) -> String {
    if !ctx.mode.is_pretty() {
        return rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n");
    }

    let mut table = ComfyTable::new();
    table.load_preset(comfy_table::presets::NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_width(ctx.width.min(u16::MAX as usize) as u16);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|c| {
            let cell = Cell::new(c.header);
            if ctx.color {
                cell.add_attribute(Attribute::Dim)
            } else {
                cell
            }
        })
        .collect();
    table.set_header(header_cells);

    for (i, col) in columns.iter().enumerate() {
        if let Some(column) = table.column_mut(i) {
            column.set_padding((0, 2));
            if col.align_right {
                column.set_cell_alignment(CellAlignment::Right);
            }
        }
    }

    for row in rows {
        table.add_row(row);
    }

    table.to_string()
}

/// Print to stdout unless the command is in JSON mode.
pub fn print(ctx: &UiContext, message: &str) {
    if !ctx.mode.is_json() {
        println!("{}", message);
    }
}

/// Format an error with an optional hint.
///
/// Pretty mode: "[ERR] message" then "Hint: ..."
/// Plain mode: "Error: message" then the hint as written
pub fn error_message(ctx: &UiContext, message: &str, error_hint: Option<&str>) -> String {
    let mut lines = Vec::new();
    if ctx.mode.is_pretty() {
        lines.push(badge(ctx, Badge::Err, message));
    } else {
        lines.push(format!("Error: {}", message));
    }
    if let Some(h) = error_hint {
        lines.push(h.to_string());
    }
    lines.join("\n")
}

/// Print an error to stderr.
pub fn print_error(ctx: &UiContext, message: &str, error_hint: Option<&str>) {
    eprintln!("{}", error_message(ctx, message, error_hint));
}
