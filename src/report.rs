//! Report rendering
//!
//! Renders a [`RunReport`] as the four-line plain-text form persisted to
//! disk and streamed back by the saved-statistics viewer.

use crate::types::RunReport;

/// Render a report as its four `Label: value` lines
///
/// Each value is formatted to exactly three decimal places; non-finite
/// values render the way Rust formats them (`inf`, `NaN`).
pub fn render(report: &RunReport) -> String {
    format!(
        "Calories: {:.3}\nSpeed: {:.3}\nDistance: {:.3}\nDuration: {:.3}\n",
        report.calories_burned,
        report.avg_speed_mph,
        report.total_distance_km,
        report.total_time_minutes,
    )
}
