//! Compass sector classification and canonical sector ordering.

use anyhow::{Result, bail};

/// 8-point compass rose in canonical clockwise order from north.
pub static SECTORS_8: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// 16-point compass rose in canonical clockwise order from north.
pub static SECTORS_16: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

// Classifier lookup tables. The trailing duplicate of "N" absorbs bearings
// that round up to a full circle; it is not a distinct sector.
static WRAPPED_8: [&str; 9] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW", "N"];
static WRAPPED_16: [&str; 17] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW", "N",
];

/// Compass rose granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum SectorMode {
    Eight,
    Sixteen,
}

impl SectorMode {
    /// Angular width of one sector in degrees.
    pub fn step(&self) -> f64 {
        match self {
            SectorMode::Eight => 45.0,
            SectorMode::Sixteen => 22.5,
        }
    }

    /// Canonical clockwise sector order, starting at north.
    pub fn sectors(&self) -> &'static [&'static str] {
        match self {
            SectorMode::Eight => &SECTORS_8,
            SectorMode::Sixteen => &SECTORS_16,
        }
    }

    fn wrapped(&self) -> &'static [&'static str] {
        match self {
            SectorMode::Eight => &WRAPPED_8,
            SectorMode::Sixteen => &WRAPPED_16,
        }
    }
}

/// Classifies a bearing in degrees into a compass sector symbol.
///
/// Accepts any finite bearing, including values outside [0, 360) and negative
/// ones; the value is normalized with `rem_euclid` first. Ties at sector
/// midlines round clockwise (`f64::round` on a non-negative value), so 22.5°
/// is `NE` in 8-sector mode and exactly `NNE` in 16-sector mode.
pub fn classify(mode: SectorMode, degrees: f64) -> &'static str {
    let normalized = degrees.rem_euclid(360.0);
    let index = (normalized / mode.step()).round() as usize;
    mode.wrapped()[index]
}

/// Position of a sector symbol in the canonical order.
///
/// A symbol outside the canonical set is a data-integrity error and is
/// reported rather than silently ignored.
pub fn sector_index(mode: SectorMode, symbol: &str) -> Result<usize> {
    match mode.sectors().iter().position(|s| *s == symbol) {
        Some(index) => Ok(index),
        None => bail!("unknown compass sector symbol: {:?}", symbol),
    }
}

/// Sorts sector symbols into canonical clockwise order from north.
///
/// Accepts duplicates and incomplete sets; fails on any symbol that is not
/// part of the rose.
pub fn sort_sectors<S: AsRef<str>>(mode: SectorMode, symbols: &[S]) -> Result<Vec<String>> {
    let mut keyed = symbols
        .iter()
        .map(|s| Ok((sector_index(mode, s.as_ref())?, s.as_ref().to_string())))
        .collect::<Result<Vec<_>>>()?;
    keyed.sort_by_key(|(index, _)| *index);
    Ok(keyed.into_iter().map(|(_, symbol)| symbol).collect())
}
