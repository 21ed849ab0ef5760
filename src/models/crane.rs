//! Crane obstruction filing records.

use serde::{Deserialize, Serialize};

/// Height datum used by every FAA filing in the feed
pub const HEIGHT_UNIT: &str = "ft AGL";

/// Geographic point (decimal degrees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

/// One crane filing, normalized from a feed row.
///
/// Records are produced once per ingestion run and never mutated. Coordinates
/// are always finite; rows that cannot produce them are dropped upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraneRecord {
    /// Filing identifier (ASN). Not unique across malformed feeds.
    pub id: String,
    pub structure_type: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Feet above ground level
    pub height: i32,
    pub height_unit: String,
    pub status: String,
    /// Passed through verbatim from the feed
    pub start_date: String,
    pub end_date: String,
    pub sponsor: String,
    pub city: String,
    pub state: String,
}

impl CraneRecord {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

impl From<&CraneRecord> for GeoPoint {
    fn from(record: &CraneRecord) -> Self {
        record.point()
    }
}
