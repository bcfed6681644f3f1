//! Output formatting and persistence for frequency tables.
//!
//! Supports pretty-printing, JSON serialization, and CSV export in long and
//! pivoted form.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::rose::compass::sort_sectors;
use crate::rose::types::FrequencyTable;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Logs a frequency table using Rust's debug pretty-print format.
pub fn print_pretty(table: &FrequencyTable) {
    debug!("{:#?}", table);
}

/// Logs a frequency table as pretty-printed JSON.
pub fn print_json(table: &FrequencyTable) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}

/// Writes the table in long form: one `sector,speed_class,count,percentage`
/// row per cell, in canonical sector order.
pub fn write_table_csv(path: &Path, table: &FrequencyTable) -> Result<()> {
    debug!(path = %path.display(), cells = table.cells.len(), "writing frequency table");

    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    for cell in &table.cells {
        writer.serialize(cell)?;
    }
    writer.flush()?;

    Ok(())
}

/// Writes the pivoted table to a file: rows keyed by speed class, columns
/// keyed by sector, cell = count.
pub fn write_pivot_csv(path: &Path, table: &FrequencyTable) -> Result<()> {
    debug!(path = %path.display(), "writing pivoted frequency table");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_pivot(file, table)
}

/// Writes the pivoted table to any writer.
///
/// Columns are re-derived through the canonical sector ordering, so a table
/// carrying a corrupt sector symbol is reported instead of rendered wrong.
pub fn write_pivot<W: Write>(writer: W, table: &FrequencyTable) -> Result<()> {
    let columns =
        sort_sectors(table.sector_mode, &table.sectors).context("ordering pivot columns")?;

    let mut wtr = WriterBuilder::new().from_writer(writer);

    let mut header = vec!["speed_class".to_string()];
    header.extend(columns.iter().cloned());
    wtr.write_record(&header)?;

    for speed_class in &table.speed_classes {
        let mut row = vec![speed_class.clone()];
        for sector in &columns {
            row.push(table.count(sector, speed_class).to_string());
        }
        wtr.write_record(&row)?;
    }
    wtr.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observations::ObservationRecord;
    use crate::rose::aggregate::aggregate;
    use crate::rose::compass::SectorMode;
    use crate::rose::speed::SpeedScaleSpec;
    use crate::rose::types::AggregateOptions;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_table(percentage: bool) -> FrequencyTable {
        let records = vec![
            ObservationRecord {
                direction_degrees: Some(10.0),
                speed: Some(3.0),
                date: None,
            },
            ObservationRecord {
                direction_degrees: Some(200.0),
                speed: Some(12.0),
                date: None,
            },
        ];
        aggregate(
            &records,
            &AggregateOptions {
                sector_mode: SectorMode::Eight,
                scale: SpeedScaleSpec::FixedDefault,
                percentage,
                month: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_table(false));
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&sample_table(true)).unwrap();
    }

    #[test]
    fn test_write_table_csv() {
        let path = temp_path("windrose_freq_test_table.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let table = sample_table(false);
        write_table_csv(Path::new(&path), &table).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        // 1 header + one row per cell
        assert_eq!(lines.len(), 1 + table.cells.len());
        assert_eq!(lines[0], "sector,speed_class,count,percentage");
        assert!(lines.iter().any(|l| l.starts_with("N,0-5 knot,1")));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_pivot_shape() {
        let table = sample_table(false);
        let mut buffer = Vec::new();
        write_pivot(&mut buffer, &table).unwrap();

        let content = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = content.lines().collect();

        // 1 header + one row per speed class
        assert_eq!(lines.len(), 1 + table.speed_classes.len());
        assert_eq!(lines[0], "speed_class,N,NE,E,SE,S,SW,W,NW");
        assert!(lines[1].starts_with("0-5 knot,1,"));
        // S column carries the 12-knot observation in the 11-15 row
        let row: Vec<_> = lines[3].split(',').collect();
        assert_eq!(row[0], "11-15 knot");
        assert_eq!(row[5], "1");
    }

    #[test]
    fn test_write_pivot_rejects_corrupt_sector() {
        let mut table = sample_table(false);
        table.sectors[0] = "XX".to_string();

        let mut buffer = Vec::new();
        let err = write_pivot(&mut buffer, &table).unwrap_err();
        assert!(format!("{:#}", err).contains("XX"));
    }
}
