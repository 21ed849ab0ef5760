//! Feed schema versions.
//!
//! The FAA lists have changed their column naming and coordinate encoding
//! over time. A [`FeedFormat`] is picked once when a pipeline is built and
//! every row of that run is read through its column map.

use serde::{Deserialize, Serialize};

use crate::coords::CoordinateMode;

/// Column names used to read one feed version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: &'static str,
    pub structure_type: &'static str,
    pub latitude: &'static str,
    pub longitude: &'static str,
    pub height_proposed: &'static str,
    pub height_determined: &'static str,
    pub start_date: &'static str,
    pub start_date_fallback: &'static str,
    pub end_date: &'static str,
    pub end_date_fallback: &'static str,
    pub status: &'static str,
    pub sponsor: &'static str,
    pub city: &'static str,
    pub state: &'static str,
}

/// OE/AAA off-airport list with decimal coordinates
const DECIMAL_COLUMNS: ColumnMap = ColumnMap {
    id: "STUDY (ASN)",
    structure_type: "STRUCTURE TYPE",
    latitude: "LATITUDE",
    longitude: "LONGITUDE",
    height_proposed: "AGL HEIGHT PROPOSED",
    height_determined: "AGL HEIGHT DET",
    start_date: "WORK SCHEDULE BEGINNING DATE",
    start_date_fallback: "ENTERED DATE",
    end_date: "WORK SCHEDULE ENDING DATE",
    end_date_fallback: "EXPIRATION DATE",
    status: "STATUS",
    sponsor: "SPONSOR NAME",
    city: "STRUCTURE CITY",
    state: "STRUCTURE STATE",
};

/// DOF derived datafile. Keeps the upstream `LONGITUTDE` misspelling.
/// Headers are trimmed on read, so `SPONSOR NAME ` matches without its
/// trailing space.
const DMS_COLUMNS: ColumnMap = ColumnMap {
    latitude: "LATITUDE",
    longitude: "LONGITUTDE",
    ..DECIMAL_COLUMNS
};

/// Feed schema version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    /// Decimal-degree coordinates in LATITUDE / LONGITUDE
    Decimal,
    /// DMS coordinates in LATITUDE / LONGITUTDE
    #[default]
    Dms,
}

impl FeedFormat {
    pub fn columns(&self) -> &'static ColumnMap {
        match self {
            FeedFormat::Decimal => &DECIMAL_COLUMNS,
            FeedFormat::Dms => &DMS_COLUMNS,
        }
    }

    pub fn coordinate_mode(&self) -> CoordinateMode {
        match self {
            FeedFormat::Decimal => CoordinateMode::Decimal,
            FeedFormat::Dms => CoordinateMode::Dms,
        }
    }
}

impl std::fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedFormat::Decimal => write!(f, "decimal"),
            FeedFormat::Dms => write!(f, "dms"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats_differ_only_in_coordinates() {
        let decimal = FeedFormat::Decimal.columns();
        let dms = FeedFormat::Dms.columns();
        assert_eq!(decimal.longitude, "LONGITUDE");
        assert_eq!(dms.longitude, "LONGITUTDE");
        assert_eq!(decimal.id, dms.id);
        assert_eq!(decimal.sponsor, dms.sponsor);
        assert_eq!(FeedFormat::Dms.coordinate_mode(), CoordinateMode::Dms);
    }
}
