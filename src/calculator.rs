//! Calorie and speed calculation
//!
//! Derives the per-file report from aggregated totals and body weight:
//! duration in minutes, average speed in mph, MET lookup on the rounded
//! speed, and the calorie estimate.

use crate::intensity::met_for_speed;
use crate::types::{BodyWeight, RunReport, RunTotals};

/// Kilometers per mile
const KM_PER_MILE: f64 = 1.609;

/// Calculator turning totals and body weight into a report
pub struct CalorieCalculator;

impl CalorieCalculator {
    /// Compute the summary report for one file's totals
    ///
    /// Pure: identical inputs always produce bit-identical output. A zero
    /// time total is not guarded; the IEEE-754 infinity or NaN it produces
    /// carries through into the report.
    pub fn summarize(totals: RunTotals, weight: BodyWeight) -> RunReport {
        let time_minutes = totals.time_seconds / 60.0;
        let avg_speed_mph = average_speed_mph(totals.distance_km, time_minutes);

        // Non-finite speeds land outside the table and use the default MET.
        let met = met_for_speed(avg_speed_mph.round() as i64);
        let calories_burned = (3.5 * time_minutes * met * weight.kilograms()) / 200.0;

        RunReport {
            calories_burned,
            avg_speed_mph,
            total_distance_km: totals.distance_km,
            total_time_minutes: time_minutes,
        }
    }
}

/// Average speed in mph: miles covered over the minutes total scaled by 60
fn average_speed_mph(distance_km: f64, time_minutes: f64) -> f64 {
    (distance_km / KM_PER_MILE) / (time_minutes / 60.0)
}
