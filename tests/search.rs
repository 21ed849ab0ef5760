//! Address-to-cranes searches with both the geocoder and the feed served
//! locally.

mod common;

use std::time::Duration;

use url::Url;

use crane_radar::feed::{cranes_to_geojson, FeedFormat, FeedSource};
use crane_radar::{CraneRecord, SearchError};

use common::{resolver, search, spawn_csv_host, spawn_geocoder, DECIMAL_HEADER};

fn boise_feed() -> String {
    format!(
        "{}\n\
         B-2,Crane,43.65,-116.2023,150,,2025-01-01,,2025-12-31,,Active,Beta Lift,BOISE,ID\n\
         A-1,Crane,43.6150,-116.2023,120,,2025-01-01,,2025-12-31,,Active,Alpha Lift,BOISE,ID\n\
         D-4,Crane,44.0,-116.2,90,,2025-01-01,,2025-12-31,,Pending,Delta Lift,EMMETT,ID\n\
         C-3,Crane,43.70,-116.2023,110,,2025-01-01,,2025-12-31,,Active,Gamma Lift,BOISE,ID\n",
        DECIMAL_HEADER
    )
}

async fn boise_search() -> crane_radar::CraneSearch {
    let (endpoint, _log) = spawn_geocoder().await;
    let feed = boise_feed();
    let addr = spawn_csv_host(&[("/cranes.csv", feed.as_str())]).await;
    let source = FeedSource::Url(Url::parse(&format!("http://{}/cranes.csv", addr)).unwrap());
    search(
        resolver(endpoint, Duration::from_millis(10)),
        FeedFormat::Decimal,
        source,
    )
}

#[tokio::test]
async fn test_nearest_first_within_radius() {
    let search = boise_search().await;

    let outcome = search.search("Boise, ID", 5.0).await.unwrap();

    assert!(!outcome.used_fallback);
    assert_eq!(outcome.location.address, "Boise, Somewhere, 00000");
    let ids: Vec<&str> = outcome.cranes.iter().map(|c| c.record.id.as_str()).collect();
    assert_eq!(ids, vec!["A-1", "B-2"]);
    assert!(outcome.cranes[0].distance_nm < 1e-6);
    assert!((outcome.cranes[1].distance_nm - 2.1).abs() < 0.05);
}

#[tokio::test]
async fn test_radius_widening_is_monotonic() {
    let search = boise_search().await;

    let mut previous = 0;
    for radius in [0.0, 3.0, 10.0, 50.0] {
        let outcome = search.search("Boise, ID", radius).await.unwrap();
        assert!(outcome.cranes.len() >= previous);
        previous = outcome.cranes.len();
    }
    assert_eq!(previous, 4);
}

#[tokio::test]
async fn test_rejected_address_is_validation_error() {
    let search = boise_search().await;

    let err = search.search("Anchorage, AK", 10.0).await.unwrap_err();
    assert!(matches!(err, SearchError::Resolve(_)));
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_geojson_of_results() {
    let search = boise_search().await;
    let outcome = search.search("Boise, ID", 5.0).await.unwrap();

    let records: Vec<CraneRecord> = outcome.cranes.into_iter().map(|c| c.record).collect();
    let geojson = cranes_to_geojson(&records);

    assert_eq!(geojson["type"], "FeatureCollection");
    let features = geojson["features"].as_array().unwrap();
    assert_eq!(features.len(), 2);
    assert_eq!(features[0]["geometry"]["coordinates"][0], -116.2023);
    assert_eq!(features[0]["geometry"]["coordinates"][1], 43.615);
}
