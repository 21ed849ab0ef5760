use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::feed::{CsvIngestionPipeline, FeedFormat, FeedSource};
use crate::geocode::{
    LocationResolver, NominatimClient, PlaceTable, RateLimiter, DEFAULT_USER_AGENT,
    NOMINATIM_SEARCH_URL,
};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub geocoder: GeocoderConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeedConfig {
    /// File path or http(s) URL of the crane CSV
    pub source: String,
    pub format: FeedFormat,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GeocoderConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub min_interval_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    pub default_radius_nm: f64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            source: "data/datafile.csv".to_string(),
            format: FeedFormat::Dms,
        }
    }
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: NOMINATIM_SEARCH_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            min_interval_ms: 1000,
            timeout_secs: 30,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_radius_nm: 10.0,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise defaults. A file that exists but
    /// does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(p) if p.as_ref().exists() => Self::load_from_file(p),
            _ => Ok(Self::default()),
        }
    }

    pub fn feed_source(&self) -> FeedSource {
        FeedSource::parse(&self.feed.source)
    }

    pub fn pipeline(&self) -> CsvIngestionPipeline {
        CsvIngestionPipeline::new(self.feed.format)
    }

    /// Build a resolver over the bundled place table.
    ///
    /// The default one-second interval shares the process-wide limiter; any
    /// other interval gets a limiter of its own.
    pub fn resolver(&self) -> Result<LocationResolver> {
        let endpoint = Url::parse(&self.geocoder.endpoint)
            .with_context(|| format!("Invalid geocoder endpoint: {}", self.geocoder.endpoint))?;

        let mut geocoder = NominatimClient::new(
            endpoint,
            &self.geocoder.user_agent,
            Duration::from_secs(self.geocoder.timeout_secs),
        );

        let interval = Duration::from_millis(self.geocoder.min_interval_ms);
        let global = RateLimiter::global();
        if interval != global.min_interval() {
            geocoder = geocoder.with_limiter(Arc::new(RateLimiter::new(interval)));
        }

        Ok(LocationResolver::new(
            Arc::new(PlaceTable::us_defaults()),
            geocoder,
        ))
    }
}
