//! Nominatim search client (tier 3 of the resolver).

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::RateLimiter;
use crate::error::ResolveError;
use crate::models::{BoundingBox, GeocodeAddress, GeocodeResult};

pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_USER_AGENT: &str = "FAA-Crane-Viewer/1.0";

/// Results at or below this importance are treated as noise
const MIN_IMPORTANCE: f64 = 0.3;

/// Number of candidates requested per query
const RESULT_LIMIT: &str = "5";

/// Nominatim encodes coordinates as strings; tolerate plain numbers too
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    fn value(&self) -> Option<f64> {
        let v = match self {
            Coordinate::Number(n) => *n,
            Coordinate::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct NominatimAddress {
    house_number: Option<String>,
    road: Option<String>,
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

/// One entry of a Nominatim `format=json` search response
#[derive(Debug, Clone, Deserialize)]
pub struct NominatimPlace {
    lat: Option<Coordinate>,
    lon: Option<Coordinate>,
    #[serde(default)]
    display_name: String,
    importance: Option<f64>,
    #[serde(default)]
    address: Option<NominatimAddress>,
    #[serde(default)]
    boundingbox: Option<Vec<Coordinate>>,
}

impl NominatimPlace {
    fn coordinates(&self) -> Option<(f64, f64)> {
        let lat = self.lat.as_ref()?.value()?;
        let lon = self.lon.as_ref()?.value()?;
        Some((lat, lon))
    }

    fn importance(&self) -> f64 {
        self.importance.unwrap_or(0.0)
    }

    /// US country code, importance above the noise floor, usable coordinates
    fn is_qualified(&self) -> bool {
        let is_us = self
            .address
            .as_ref()
            .and_then(|a| a.country_code.as_deref())
            .map(|cc| cc.eq_ignore_ascii_case("us"))
            .unwrap_or(false);

        is_us && self.importance() > MIN_IMPORTANCE && self.coordinates().is_some()
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        let values: Vec<f64> = self
            .boundingbox
            .as_ref()?
            .iter()
            .map(Coordinate::value)
            .collect::<Option<_>>()?;
        match values.as_slice() {
            [south, north, west, east] => Some(BoundingBox {
                south: *south,
                north: *north,
                west: *west,
                east: *east,
            }),
            _ => None,
        }
    }

    fn into_result(self) -> Option<GeocodeResult> {
        let (latitude, longitude) = self.coordinates()?;
        let bounding_box = self.bounding_box();
        let confidence = self.importance();
        let addr = self.address.unwrap_or_default();

        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        Some(GeocodeResult {
            latitude,
            longitude,
            display_name: self.display_name,
            address: GeocodeAddress {
                house_number: non_empty(addr.house_number),
                road: non_empty(addr.road),
                city: non_empty(addr.city)
                    .or_else(|| non_empty(addr.town))
                    .or_else(|| non_empty(addr.village)),
                state: non_empty(addr.state),
                postcode: non_empty(addr.postcode),
                country: non_empty(addr.country).unwrap_or_else(|| "United States".to_string()),
            },
            bounding_box,
            confidence,
        })
    }
}

/// Rate-limited client for a Nominatim-compatible search endpoint
#[derive(Clone)]
pub struct NominatimClient {
    client: Client,
    endpoint: Url,
    limiter: Arc<RateLimiter>,
}

impl NominatimClient {
    pub fn new(endpoint: Url, user_agent: &str, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .user_agent(user_agent)
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint,
            limiter: RateLimiter::global(),
        }
    }

    /// Use a private limiter instead of the process-wide one
    pub fn with_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = limiter;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("format", "json")
            .append_pair("addressdetails", "1")
            .append_pair("limit", RESULT_LIMIT)
            .append_pair("countrycodes", "us")
            .append_pair("accept-language", "en");
        url
    }

    /// Raw candidates for `query`, in service rank order
    pub async fn search(
        &self,
        query: &str,
        suggestions: &str,
    ) -> Result<Vec<NominatimPlace>, ResolveError> {
        self.limiter.acquire().await;

        let url = self.search_url(query);
        info!("Geocoding URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ResolveError::Network)?;

        if !response.status().is_success() {
            return Err(ResolveError::ServiceStatus(response.status()));
        }

        let body = response.text().await.map_err(ResolveError::Network)?;
        let places: Vec<NominatimPlace> =
            serde_json::from_str(&body).map_err(|source| ResolveError::Decode {
                suggestions: suggestions.to_string(),
                source,
            })?;

        debug!("Geocoder returned {} candidates", places.len());
        Ok(places)
    }

    /// Best qualified US result for `query`
    pub async fn geocode(
        &self,
        query: &str,
        suggestions: &str,
    ) -> Result<GeocodeResult, ResolveError> {
        let places = self.search(query, suggestions).await?;

        if places.is_empty() {
            return Err(ResolveError::NoResults {
                query: query.to_string(),
                suggestions: suggestions.to_string(),
            });
        }

        places
            .into_iter()
            .filter(NominatimPlace::is_qualified)
            .find_map(NominatimPlace::into_result)
            .ok_or_else(|| ResolveError::NoUsResults {
                query: query.to_string(),
                suggestions: suggestions.to_string(),
            })
    }
}
