use crate::observations::{ObservationRecord, filter_observations};
use crate::rose::compass::{classify, sector_index};
use crate::rose::types::{AggregateOptions, FrequencyCell, FrequencyTable};
use crate::rose::utility::summarize_speeds;
use anyhow::{Context, Result};
use tracing::{debug, warn};

/// Aggregates raw observation rows into a complete [`FrequencyTable`].
///
/// Rows are filtered first (missing, non-finite, negative-speed, and
/// month-mismatched values are dropped), the speed scale is resolved against
/// the surviving values, and every surviving observation is counted into a
/// pre-zeroed sector × speed-class grid. The grid covers the full
/// cross-product, so every sector appears in the output even when nothing was
/// observed there and an empty dataset still yields a well-formed all-zero
/// table.
pub fn aggregate(
    records: &[ObservationRecord],
    options: &AggregateOptions,
) -> Result<FrequencyTable> {
    let observations = filter_observations(records, options.month);

    let dropped = records.len() - observations.len();
    if dropped > 0 {
        debug!(kept = observations.len(), dropped, "observation rows filtered");
    }
    if observations.is_empty() {
        warn!("no observations survived filtering, emitting an all-zero table");
    }

    let speeds: Vec<f64> = observations.iter().map(|o| o.speed).collect();
    let scale = options
        .scale
        .resolve(&speeds)
        .context("resolving speed classes")?;

    let sectors = options.sector_mode.sectors();
    let classes = scale.class_count();

    // Full cross-product, zero-initialized up front; counting only ever
    // increments existing cells.
    let mut counts = vec![0u64; sectors.len() * classes];
    let mut total: u64 = 0;

    for observation in &observations {
        let sector = classify(options.sector_mode, observation.direction_degrees);
        let Some(class) = scale.classify(observation.speed) else {
            debug!(
                speed = observation.speed,
                "speed below the configured scale, dropped"
            );
            continue;
        };
        let sector_pos = sector_index(options.sector_mode, sector)?;
        counts[sector_pos * classes + class] += 1;
        total += 1;
    }

    let mut cells = Vec::with_capacity(counts.len());
    for (sector_pos, sector) in sectors.iter().enumerate() {
        for (class, label) in scale.labels().iter().enumerate() {
            let count = counts[sector_pos * classes + class];
            let percentage = options.percentage.then(|| {
                if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                }
            });
            cells.push(FrequencyCell {
                sector: sector.to_string(),
                speed_class: label.clone(),
                count,
                percentage,
            });
        }
    }

    Ok(FrequencyTable {
        sector_mode: options.sector_mode,
        sectors: sectors.iter().map(|s| s.to_string()).collect(),
        speed_classes: scale.labels().to_vec(),
        cells,
        total_count: total,
        speed_summary: summarize_speeds(&speeds),
    })
}
