//! UI primitives for the Intake CLI.
//!
//! - **Context**: terminal detection (TTY, width, color, unicode)
//! - **Mode**: output mode resolution (json, plain, pretty)
//! - **Theme**: badges and owo-colors styles
//! - **Render**: tables, receipts, hints, errors
//! - **Format**: timestamp and number display
//! - **Chart**: area chart drawing for the projected series

pub mod chart;
mod context;
pub mod format;
mod mode;
pub mod render;
pub mod theme;

pub use context::UiContext;
pub use theme::Badge;

pub use render::{badge, hint, kv, print, print_error, receipt, simple_table, Column};

pub use chart::area_chart;
pub use format::{group_thousands, TimeDisplay};
