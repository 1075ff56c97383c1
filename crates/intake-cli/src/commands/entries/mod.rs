//! Handlers that add or read intake records.

mod add;
mod chart;
mod list;

pub use add::handle_add;
pub use chart::handle_chart;
pub use list::handle_list;
