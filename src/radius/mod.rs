//! Great-circle distance and radius membership in nautical miles.

mod index;

pub use index::{CraneIndex, NearbyCrane};

use crate::models::{CraneRecord, GeoPoint};

/// Mean Earth radius in nautical miles
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Exact definition of the international nautical mile
pub const METERS_PER_NM: f64 = 1852.0;

/// Haversine distance between two points
pub fn distance_nm(center: GeoPoint, point: GeoPoint) -> f64 {
    let lat1 = center.latitude.to_radians();
    let lat2 = point.latitude.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (point.longitude - center.longitude).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_NM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// Inclusive at the boundary
pub fn within_radius(center: GeoPoint, point: GeoPoint, radius_nm: f64) -> bool {
    distance_nm(center, point) <= radius_nm
}

pub fn nm_to_meters(nm: f64) -> f64 {
    nm * METERS_PER_NM
}

/// Records within `radius_nm` of `center`, in input order
pub fn filter_within_radius(
    records: &[CraneRecord],
    center: GeoPoint,
    radius_nm: f64,
) -> Vec<CraneRecord> {
    records
        .iter()
        .filter(|r| within_radius(center, r.point(), radius_nm))
        .cloned()
        .collect()
}

/// Small deterministic generator for property-style tests
#[cfg(test)]
pub(crate) struct Lcg(u64);

#[cfg(test)]
impl Lcg {
    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform in [lo, hi)
    pub(crate) fn range(&mut self, lo: f64, hi: f64) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let unit = (self.0 >> 11) as f64 / (1u64 << 53) as f64;
        lo + unit * (hi - lo)
    }

    pub(crate) fn point(&mut self) -> GeoPoint {
        GeoPoint::new(self.range(-90.0, 90.0), self.range(-180.0, 180.0))
    }
}
