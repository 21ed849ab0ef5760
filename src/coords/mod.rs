//! Coordinate normalization.
//!
//! FAA feeds have shipped coordinates in two encodings: plain decimal degrees
//! and degree-minute-second strings such as `"33 - 27 - 28.73 N"`. The feed
//! format decides which one applies; nothing here sniffs the input.

mod dms;

pub use dms::{format_dms, parse_dms};

use serde::{Deserialize, Serialize};

/// Encoding of a coordinate cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateMode {
    Decimal,
    Dms,
}

/// Which half of a coordinate pair a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl CoordinateMode {
    /// Parse a cell into decimal degrees. `None` for anything that does not
    /// yield a finite number.
    pub fn parse(&self, raw: &str) -> Option<f64> {
        let value = match self {
            CoordinateMode::Decimal => parse_decimal(raw)?,
            CoordinateMode::Dms => parse_dms(raw)?,
        };
        value.is_finite().then_some(value)
    }
}

/// Parse a decimal-degree string. Empty or non-numeric input is `None`.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}
