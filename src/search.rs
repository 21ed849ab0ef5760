//! End-to-end crane search: resolve the address, load the feed, keep the
//! cranes inside the radius.

use serde::Serialize;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{ResolveError, SearchError};
use crate::feed::{CsvIngestionPipeline, FeedSource};
use crate::geocode::{format_display_address, LocationResolver};
use crate::models::{GeocodeResult, Location};
use crate::radius::{CraneIndex, NearbyCrane};

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub location: Location,
    pub geocode: GeocodeResult,
    pub radius_nm: f64,
    /// Nearest first
    pub cranes: Vec<NearbyCrane>,
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_error: Option<String>,
}

#[derive(Clone)]
pub struct CraneSearch {
    resolver: LocationResolver,
    pipeline: CsvIngestionPipeline,
    source: FeedSource,
}

impl CraneSearch {
    pub fn new(
        resolver: LocationResolver,
        pipeline: CsvIngestionPipeline,
        source: FeedSource,
    ) -> Self {
        Self {
            resolver,
            pipeline,
            source,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            config.resolver()?,
            config.pipeline(),
            config.feed_source(),
        ))
    }

    pub fn resolver(&self) -> &LocationResolver {
        &self.resolver
    }

    pub fn source(&self) -> &FeedSource {
        &self.source
    }

    /// Run one search.
    ///
    /// Resolution and ingestion run concurrently. A resolution failure is
    /// returned as an error; a feed failure only marks the outcome as served
    /// from the sample dataset.
    pub async fn search(
        &self,
        address: &str,
        radius_nm: f64,
    ) -> Result<SearchOutcome, SearchError> {
        if !radius_nm.is_finite() || radius_nm < 0.0 {
            return Err(SearchError::InvalidRadius(radius_nm));
        }
        if address.trim().is_empty() {
            return Err(ResolveError::EmptyAddress.into());
        }

        let (resolved, feed) = futures::join!(
            self.resolver.resolve_validated(address),
            self.pipeline.ingest(&self.source)
        );
        let geocode = resolved?;

        if feed.used_fallback {
            warn!(
                "Serving sample crane data: {}",
                feed.error.as_deref().unwrap_or("unknown error")
            );
        }

        let location = geocode.to_location(format_display_address(&geocode));
        let index = CraneIndex::build(feed.records);
        let cranes = index.within_radius(location.point(), radius_nm);

        info!(
            "Found {} of {} cranes within {} NM of {}",
            cranes.len(),
            index.len(),
            radius_nm,
            location.address
        );

        Ok(SearchOutcome {
            location,
            geocode,
            radius_nm,
            cranes,
            used_fallback: feed.used_fallback,
            feed_error: feed.error,
        })
    }
}
