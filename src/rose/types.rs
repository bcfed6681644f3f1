//! Data types produced by the aggregation pipeline.

use crate::rose::compass::SectorMode;
use crate::rose::speed::SpeedScaleSpec;
use serde::Serialize;

/// Parameters for one aggregation run. One options value replaces the
/// near-duplicate script variants the tool grew out of: granularity, speed
/// scale, percentage output, and an optional calendar-month pre-filter.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    pub sector_mode: SectorMode,
    pub scale: SpeedScaleSpec,
    /// Add `count / total * 100` to every cell.
    pub percentage: bool,
    /// Keep only observations from this month of the year (1-12, any year).
    pub month: Option<u32>,
}

/// One sector × speed-class cell of the frequency table.
#[derive(Debug, Clone, Serialize)]
pub struct FrequencyCell {
    pub sector: String,
    pub speed_class: String,
    pub count: u64,
    /// Share of the table total, present when percentage output was requested.
    pub percentage: Option<f64>,
}

/// The complete frequency table for one dataset.
///
/// Cells cover the full sector × speed-class cross-product, ordered
/// sector-major in canonical compass order with speed classes in scale
/// order, so tables from different datasets always share a shape.
#[derive(Debug, Serialize)]
pub struct FrequencyTable {
    pub sector_mode: SectorMode,
    /// Sectors in canonical clockwise order.
    pub sectors: Vec<String>,
    /// Speed-class labels in scale order.
    pub speed_classes: Vec<String>,
    pub cells: Vec<FrequencyCell>,
    /// Observations counted into the table.
    pub total_count: u64,
    pub speed_summary: SpeedSummary,
}

impl FrequencyTable {
    /// Count for one (sector, speed class) pair; 0 for pairs not in the table.
    pub fn count(&self, sector: &str, speed_class: &str) -> u64 {
        self.cells
            .iter()
            .find(|cell| cell.sector == sector && cell.speed_class == speed_class)
            .map(|cell| cell.count)
            .unwrap_or(0)
    }
}

/// Descriptive statistics over the surviving speed values.
#[derive(Debug, Clone, Serialize)]
pub struct SpeedSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}
