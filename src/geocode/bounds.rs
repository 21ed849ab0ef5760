//! Continental United States acceptance check.

use geo::{coord, Intersects, Rect};

use crate::error::ResolveError;
use crate::models::GeoPoint;

pub const CONUS_SOUTH: f64 = 24.396308;
pub const CONUS_NORTH: f64 = 49.384472;
pub const CONUS_WEST: f64 = -124.848974;
pub const CONUS_EAST: f64 = -66.934570;

/// Lower 48 bounding box (x = longitude, y = latitude)
pub fn continental_us() -> Rect<f64> {
    Rect::new(
        coord! { x: CONUS_WEST, y: CONUS_SOUTH },
        coord! { x: CONUS_EAST, y: CONUS_NORTH },
    )
}

/// Edges count as inside
pub fn is_within_continental_us(point: GeoPoint) -> bool {
    point.is_finite()
        && continental_us().intersects(&coord! { x: point.longitude, y: point.latitude })
}

pub fn ensure_within_continental_us(point: GeoPoint) -> Result<(), ResolveError> {
    if is_within_continental_us(point) {
        Ok(())
    } else {
        Err(ResolveError::OutsideContinentalUs {
            lat: point.latitude,
            lng: point.longitude,
        })
    }
}
