//! Report artifact generation: PNG charts and the Markdown summary.

mod charts;
mod summary;

pub use charts::{render_charts, CHART_HEIGHT, CHART_WIDTH};
pub use summary::write_summary;
