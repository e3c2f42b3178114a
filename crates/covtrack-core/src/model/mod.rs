// ── Domain model ──
//
// Canonical types shared by the controller, the chart data source and the
// UI. Wire-format quirks (integer dates, nullable counts) are resolved in
// `convert` before anything here is constructed.

pub mod record;
pub mod selection;

pub use record::DailyRecord;
pub use selection::{Jurisdiction, Metric, SelectionState, TimeWindow};
