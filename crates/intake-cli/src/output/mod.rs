//! Output formatting for records and the chart series.

mod json;
mod text;

pub use json::{chart_json, records_json};
pub use text::{record_line, record_rows, LIST_COLUMNS};
