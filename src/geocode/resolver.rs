//! Tiered free-text address resolution.

use std::sync::Arc;

use tracing::{debug, info};

use super::{ensure_within_continental_us, NominatimClient, PlaceTable, PredefinedPlace};
use crate::error::ResolveError;
use crate::models::{GeocodeAddress, GeocodeResult};

/// How many predefined keys an error message offers as examples
const SUGGESTION_COUNT: usize = 5;

/// Which tier produced a resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionTier {
    Exact,
    Partial,
    Service,
}

/// Resolves addresses via exact predefined match, partial predefined match,
/// then the external geocoder. The first tier with a hit wins.
#[derive(Clone)]
pub struct LocationResolver {
    places: Arc<PlaceTable>,
    geocoder: NominatimClient,
}

impl LocationResolver {
    pub fn new(places: Arc<PlaceTable>, geocoder: NominatimClient) -> Self {
        Self { places, geocoder }
    }

    pub fn places(&self) -> &PlaceTable {
        &self.places
    }

    /// Predefined-table lookup only. `None` means the service tier would run.
    pub fn match_predefined(&self, address: &str) -> Option<(ResolutionTier, GeocodeResult)> {
        let normalized = address.trim().to_lowercase();

        if let Some(place) = self.places.match_exact(&normalized) {
            return Some((ResolutionTier::Exact, predefined_result(place)));
        }
        self.places
            .match_partial(&normalized)
            .map(|place| (ResolutionTier::Partial, predefined_result(place)))
    }

    /// Resolve an address to coordinates without the continental-US check
    pub async fn resolve(&self, address: &str) -> Result<GeocodeResult, ResolveError> {
        self.resolve_with_tier(address).await.map(|(_, r)| r)
    }

    pub async fn resolve_with_tier(
        &self,
        address: &str,
    ) -> Result<(ResolutionTier, GeocodeResult), ResolveError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(ResolveError::EmptyAddress);
        }

        if let Some((tier, result)) = self.match_predefined(query) {
            info!(
                "Found predefined location match ({:?}): {}",
                tier, result.display_name
            );
            return Ok((tier, result));
        }

        debug!("No predefined match for {:?}, querying geocoder", query);
        let suggestions = self.places.suggestions(SUGGESTION_COUNT);
        let result = self.geocoder.geocode(query, &suggestions).await?;
        Ok((ResolutionTier::Service, result))
    }

    /// Resolve and require the point to lie in the continental US
    pub async fn resolve_validated(&self, address: &str) -> Result<GeocodeResult, ResolveError> {
        let result = self.resolve(address).await?;
        ensure_within_continental_us(result.point())?;
        Ok(result)
    }
}

/// Confidence 1.0; city and state come from either side of the first comma
fn predefined_result(place: &PredefinedPlace) -> GeocodeResult {
    let (city, state) = match place.display_name.split_once(',') {
        Some((city, state)) => (city.trim(), state.trim()),
        None => (place.display_name.trim(), ""),
    };
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());

    GeocodeResult {
        latitude: place.lat,
        longitude: place.lng,
        display_name: place.display_name.clone(),
        address: GeocodeAddress {
            city: non_empty(city),
            state: non_empty(state),
            country: "United States".to_string(),
            ..Default::default()
        },
        bounding_box: None,
        confidence: 1.0,
    }
}
