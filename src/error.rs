//! Error types for the feed pipeline and the location resolver.

use thiserror::Error;

/// Failure to load the CSV feed. The pipeline recovers from every variant
/// by serving the sample dataset.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Failed to read CSV from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to fetch CSV: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch CSV: {0}")]
    Status(reqwest::StatusCode),

    #[error("CSV contained no data rows")]
    Empty,
}

/// Failure to turn free-text input into a usable search origin
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Address is required")]
    EmptyAddress,

    #[error("Unable to connect to geocoding service. Please check your internet connection.")]
    Network(#[source] reqwest::Error),

    #[error("Geocoding service returned {0}")]
    ServiceStatus(reqwest::StatusCode),

    #[error("Failed to geocode address. Please try one of these locations: {suggestions}")]
    Decode {
        suggestions: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("No results found for \"{query}\". Try one of these: {suggestions}")]
    NoResults { query: String, suggestions: String },

    #[error("No valid US addresses found for \"{query}\". Try one of these: {suggestions}")]
    NoUsResults { query: String, suggestions: String },

    #[error("Location ({lat:.4}, {lng:.4}) is outside the continental United States")]
    OutsideContinentalUs { lat: f64, lng: f64 },
}

impl ResolveError {
    /// Errors the user fixes by changing their input, as opposed to
    /// upstream service trouble.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ResolveError::EmptyAddress
                | ResolveError::NoResults { .. }
                | ResolveError::NoUsResults { .. }
                | ResolveError::OutsideContinentalUs { .. }
        )
    }
}

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Radius must be a non-negative number of nautical miles, got {0}")]
    InvalidRadius(f64),

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl SearchError {
    pub fn is_validation(&self) -> bool {
        match self {
            SearchError::InvalidRadius(_) => true,
            SearchError::Resolve(e) => e.is_validation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        let err = ResolveError::NoResults {
            query: "Nowhere".to_string(),
            suggestions: "phoenix, az, phoenix".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No results found for \"Nowhere\". Try one of these: phoenix, az, phoenix"
        );
        assert!(err.is_validation());

        let err = ResolveError::OutsideContinentalUs {
            lat: 61.2181,
            lng: -149.9003,
        };
        assert!(err.to_string().contains("61.2181, -149.9003"));
    }

    #[test]
    fn test_upstream_errors_are_not_validation() {
        let err = ResolveError::ServiceStatus(reqwest::StatusCode::BAD_GATEWAY);
        assert!(!err.is_validation());
        assert!(SearchError::InvalidRadius(-1.0).is_validation());
    }
}
