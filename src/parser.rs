//! CSV input provider for observation rows.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::observations::ObservationRecord;

/// Reads observation rows from a CSV file.
pub fn read_observations(path: &Path) -> Result<Vec<ObservationRecord>> {
    let file =
        File::open(path).with_context(|| format!("opening observation file {}", path.display()))?;
    parse_observations(file)
}

/// Parses observation rows from CSV data.
///
/// The header must contain a direction column (`direction_degrees` or `ddd`)
/// and a speed column (`speed` or `ff`). Rows that fail to deserialize are
/// logged and skipped; only a missing required column is fatal.
///
/// # Errors
///
/// Returns an error if the header cannot be read or a required column is
/// absent.
pub fn parse_observations<R: Read>(reader: R) -> Result<Vec<ObservationRecord>> {
    let mut rdr = csv::Reader::from_reader(reader);

    let headers = rdr.headers().context("reading CSV header")?.clone();
    let has_column = |names: [&str; 2]| headers.iter().any(|h| names.contains(&h.trim()));
    if !has_column(["direction_degrees", "ddd"]) {
        bail!("missing required column: direction_degrees (or ddd)");
    }
    if !has_column(["speed", "ff"]) {
        bail!("missing required column: speed (or ff)");
    }

    let mut rows = Vec::new();
    for (index, result) in rdr.deserialize().enumerate() {
        match result {
            Ok(record) => rows.push(record),
            // +2: 1-based line numbers, after the header
            Err(e) => warn!(line = index + 2, error = %e, "skipping unreadable row"),
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical_column_names() {
        let data = "direction_degrees,speed\n10,3\n200,12.5\n";
        let rows = parse_observations(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].direction_degrees, Some(10.0));
        assert_eq!(rows[1].speed, Some(12.5));
        assert_eq!(rows[0].date, None);
    }

    #[test]
    fn test_parse_spreadsheet_aliases() {
        let data = "date,ddd,ff\n2023-01-05,45,7\n2023-01-06,,\n";
        let rows = parse_observations(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].direction_degrees, Some(45.0));
        assert_eq!(rows[0].speed, Some(7.0));
        assert_eq!(rows[0].date.unwrap().to_string(), "2023-01-05");
        // empty fields survive as None for the filter step
        assert_eq!(rows[1].direction_degrees, None);
        assert_eq!(rows[1].speed, None);
    }

    #[test]
    fn test_parse_missing_required_column() {
        let data = "ddd,humidity\n10,80\n";
        let err = parse_observations(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("speed"));
    }

    #[test]
    fn test_parse_skips_unreadable_rows() {
        let data = "ddd,ff\n10,3\nnot-a-number,also-not\n20,4\n";
        let rows = parse_observations(data.as_bytes()).unwrap();

        // the damaged middle row is dropped, the rest survive
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].direction_degrees, Some(20.0));
    }
}
