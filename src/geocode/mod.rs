//! Address resolution: predefined places, Nominatim fallback, and
//! continental-US validation.

mod bounds;
mod display;
mod nominatim;
mod places;
mod rate_limit;
mod resolver;

pub use bounds::{
    continental_us, ensure_within_continental_us, is_within_continental_us, CONUS_EAST,
    CONUS_NORTH, CONUS_SOUTH, CONUS_WEST,
};
pub use display::format_display_address;
pub use nominatim::{NominatimClient, NominatimPlace, DEFAULT_USER_AGENT, NOMINATIM_SEARCH_URL};
pub use places::{PlaceTable, PredefinedPlace};
pub use rate_limit::{RateLimiter, DEFAULT_MIN_INTERVAL};
pub use resolver::{LocationResolver, ResolutionTier};
