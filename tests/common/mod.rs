//! In-process HTTP fixtures: a Nominatim stand-in and a static CSV host.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tokio::time::Instant;
use url::Url;

use crane_radar::feed::{CsvIngestionPipeline, FeedFormat, FeedSource};
use crane_radar::geocode::{LocationResolver, NominatimClient, PlaceTable, RateLimiter};
use crane_radar::CraneSearch;

pub const TEST_USER_AGENT: &str = "crane-radar-tests/0.1";

/// Serve `router` on an ephemeral localhost port
pub async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// One request seen by the fake geocoder
#[derive(Debug, Clone)]
pub struct GeocoderHit {
    pub query: String,
    pub user_agent: Option<String>,
    pub at: Instant,
}

#[derive(Clone, Default)]
pub struct GeocoderLog(Arc<Mutex<Vec<GeocoderHit>>>);

impl GeocoderLog {
    pub fn hits(&self) -> Vec<GeocoderHit> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

pub fn place(lat: f64, lon: f64, importance: f64, country_code: &str, city: &str) -> Value {
    json!({
        "lat": lat.to_string(),
        "lon": lon.to_string(),
        "display_name": format!("{}, United States", city),
        "importance": importance,
        "boundingbox": [
            (lat - 0.1).to_string(),
            (lat + 0.1).to_string(),
            (lon - 0.1).to_string(),
            (lon + 0.1).to_string()
        ],
        "address": {
            "town": city,
            "state": "Somewhere",
            "postcode": "00000",
            "country": "United States",
            "country_code": country_code
        }
    })
}

/// Canned responses keyed on the `q` parameter
async fn fake_search(
    State(log): State<GeocoderLog>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let query = params.get("q").cloned().unwrap_or_default();
    log.0.lock().unwrap().push(GeocoderHit {
        query: query.clone(),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        at: Instant::now(),
    });

    let body = match query.as_str() {
        "Boise, ID" => json!([
            place(43.6150, -116.2023, 0.72, "us", "Boise"),
            place(43.6, -116.3, 0.9, "us", "Meridian")
        ]),
        "Anchorage, AK" => json!([place(61.2181, -149.9003, 0.65, "us", "Anchorage")]),
        "Vancouver, BC" => json!([
            place(49.2827, -123.1207, 0.8, "ca", "Vancouver"),
            place(45.6387, -122.6615, 0.2, "us", "Vancouver")
        ]),
        "Service Down" => return StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "Garbled" => return (StatusCode::OK, "<html>not json</html>").into_response(),
        _ => json!([]),
    };
    axum::Json(body).into_response()
}

pub async fn spawn_geocoder() -> (Url, GeocoderLog) {
    let log = GeocoderLog::default();
    let router = Router::new()
        .route("/search", get(fake_search))
        .with_state(log.clone());
    let addr = serve(router).await;
    (Url::parse(&format!("http://{}/search", addr)).unwrap(), log)
}

/// Static files by path; anything else is a 404
pub async fn spawn_csv_host(files: &[(&str, &str)]) -> SocketAddr {
    let mut router = Router::new();
    for (path, body) in files {
        let body = body.to_string();
        router = router.route(path, get(move || async move { body }));
    }
    serve(router).await
}

pub fn resolver(endpoint: Url, min_interval: Duration) -> LocationResolver {
    let geocoder = NominatimClient::new(endpoint, TEST_USER_AGENT, Duration::from_secs(5))
        .with_limiter(Arc::new(RateLimiter::new(min_interval)));
    LocationResolver::new(Arc::new(PlaceTable::us_defaults()), geocoder)
}

pub fn search(resolver: LocationResolver, format: FeedFormat, source: FeedSource) -> CraneSearch {
    CraneSearch::new(resolver, CsvIngestionPipeline::new(format), source)
}

pub const DMS_HEADER: &str = "STUDY (ASN),STRUCTURE TYPE,LATITUDE,LONGITUTDE,AGL HEIGHT PROPOSED,AGL HEIGHT DET,WORK SCHEDULE BEGINNING DATE,ENTERED DATE,WORK SCHEDULE ENDING DATE,EXPIRATION DATE,STATUS,SPONSOR NAME ,STRUCTURE CITY,STRUCTURE STATE";

pub const DECIMAL_HEADER: &str = "STUDY (ASN),STRUCTURE TYPE,LATITUDE,LONGITUDE,AGL HEIGHT PROPOSED,AGL HEIGHT DET,WORK SCHEDULE BEGINNING DATE,ENTERED DATE,WORK SCHEDULE ENDING DATE,EXPIRATION DATE,STATUS,SPONSOR NAME,STRUCTURE CITY,STRUCTURE STATE";
