//! Core data models shared by the feed pipeline and the geocoder.

pub mod crane;
pub mod geocode;

pub use crane::{CraneRecord, GeoPoint, HEIGHT_UNIT};
pub use geocode::{BoundingBox, GeocodeAddress, GeocodeResult, Location};
