//! Observation rows and the filtering applied before aggregation.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::debug;

/// A single row as read from an observation CSV.
///
/// Fields are optional so incomplete rows survive deserialization and can be
/// dropped with a reason instead of failing the whole file. The `ddd` and
/// `ff` aliases match the column names used by the upstream observation
/// spreadsheets.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationRecord {
    /// Wind bearing in degrees.
    #[serde(alias = "ddd")]
    pub direction_degrees: Option<f64>,
    /// Wind speed in knots.
    #[serde(alias = "ff")]
    pub speed: Option<f64>,
    /// Observation date, when the source provides one (`%Y-%m-%d`).
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// A validated observation: finite direction, finite non-negative speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub direction_degrees: f64,
    pub speed: f64,
}

/// Drops rows that cannot be aggregated: missing or non-finite direction or
/// speed, negative speed, and, when a month filter is set, rows whose date is
/// absent or falls in a different calendar month (month-of-year match, any
/// year).
pub fn filter_observations(
    records: &[ObservationRecord],
    month: Option<u32>,
) -> Vec<Observation> {
    let mut kept = Vec::with_capacity(records.len());

    for (row, record) in records.iter().enumerate() {
        if let Some(wanted) = month {
            match record.date {
                Some(date) if date.month() == wanted => {}
                _ => {
                    debug!(row, "row outside requested month, dropped");
                    continue;
                }
            }
        }

        let (Some(direction), Some(speed)) = (record.direction_degrees, record.speed) else {
            debug!(row, "row missing direction or speed, dropped");
            continue;
        };

        if !direction.is_finite() || !speed.is_finite() || speed < 0.0 {
            debug!(row, direction, speed, "row with unusable value, dropped");
            continue;
        }

        kept.push(Observation {
            direction_degrees: direction,
            speed,
        });
    }

    kept
}
