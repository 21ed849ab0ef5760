//! Crane Radar - FAA crane filings near an address
//!
//! This library provides the feed pipeline, geocoding and radius search
//! shared by the `crane-search`, `crane-server` and `dof-convert` binaries.

pub mod config;
pub mod coords;
pub mod error;
pub mod feed;
pub mod geocode;
pub mod models;
pub mod radius;
pub mod search;

pub use config::Config;
pub use error::{FeedError, ResolveError, SearchError};
pub use models::{CraneRecord, GeoPoint, GeocodeResult, Location};
pub use search::{CraneSearch, SearchOutcome};
