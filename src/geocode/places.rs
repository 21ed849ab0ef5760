//! Known place names resolved without a network call.

use serde::{Deserialize, Serialize};

/// Coordinates and label for a known place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredefinedPlace {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
}

/// Ordered, immutable lookup table of lower-case place keys.
///
/// Iteration order is definition order. Partial matching returns the first
/// key that matches, so reordering entries changes results for ambiguous
/// input.
#[derive(Debug, Clone, Default)]
pub struct PlaceTable {
    entries: Vec<(String, PredefinedPlace)>,
}

#[rustfmt::skip]
const US_PLACES: &[(&str, f64, f64, &str)] = &[
    // Major US cities
    ("phoenix, az", 33.4484, -112.0740, "Phoenix, AZ"),
    ("phoenix", 33.4484, -112.0740, "Phoenix, AZ"),
    ("phoenix arizona", 33.4484, -112.0740, "Phoenix, AZ"),
    ("tucson, az", 32.2217, -110.9265, "Tucson, AZ"),
    ("tolleson, az", 33.4539, -112.2593, "Tolleson, AZ"),
    ("tolleson", 33.4539, -112.2593, "Tolleson, AZ"),
    ("los angeles, ca", 34.0522, -118.2437, "Los Angeles, CA"),
    ("san francisco, ca", 37.7749, -122.4194, "San Francisco, CA"),
    ("new york, ny", 40.7128, -74.0060, "New York, NY"),
    ("chicago, il", 41.8781, -87.6298, "Chicago, IL"),
    ("houston, tx", 29.7604, -95.3698, "Houston, TX"),
    ("dallas, tx", 32.7767, -96.7970, "Dallas, TX"),
    ("miami, fl", 25.7617, -80.1918, "Miami, FL"),
    ("seattle, wa", 47.6062, -122.3321, "Seattle, WA"),
    ("denver, co", 39.7392, -104.9903, "Denver, CO"),
    ("atlanta, ga", 33.7490, -84.3880, "Atlanta, GA"),
    ("las vegas, nv", 36.1699, -115.1398, "Las Vegas, NV"),
    // States (capital or central point)
    ("arizona", 33.4484, -112.0740, "Arizona"),
    ("california", 38.5767, -121.4934, "California"),
    ("texas", 30.2672, -97.7431, "Texas"),
    ("florida", 30.4518, -84.27277, "Florida"),
    ("new york", 42.9538, -75.5268, "New York"),
    ("illinois", 39.7817, -89.6501, "Illinois"),
    ("washington", 47.0379, -120.8407, "Washington"),
    ("colorado", 39.0598, -105.3111, "Colorado"),
    ("georgia", 33.0406, -83.6431, "Georgia"),
    ("nevada", 38.3135, -117.0554, "Nevada"),
];

impl PlaceTable {
    /// Build a table from `(key, place)` pairs. Keys are lower-cased and
    /// trimmed; a repeated key keeps its first definition.
    pub fn new<K: AsRef<str>>(entries: impl IntoIterator<Item = (K, PredefinedPlace)>) -> Self {
        let mut table = Self::default();
        for (key, place) in entries {
            let key = key.as_ref().trim().to_lowercase();
            if table.get(&key).is_none() {
                table.entries.push((key, place));
            }
        }
        table
    }

    /// Cities and states bundled with the application
    pub fn us_defaults() -> Self {
        Self::new(US_PLACES.iter().map(|&(key, lat, lng, name)| {
            (
                key,
                PredefinedPlace {
                    lat,
                    lng,
                    display_name: name.to_string(),
                },
            )
        }))
    }

    /// Exact lookup of an already-normalized key
    pub fn get(&self, key: &str) -> Option<&PredefinedPlace> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, place)| place)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PredefinedPlace)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First `n` keys in definition order, comma separated
    pub fn suggestions(&self, n: usize) -> String {
        self.entries
            .iter()
            .take(n)
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Tier 1: verbatim lookup of the normalized input
    pub fn match_exact(&self, normalized: &str) -> Option<&PredefinedPlace> {
        self.get(normalized)
    }

    /// Tier 2: comma segments first, then substring containment in either
    /// direction over keys in definition order.
    pub fn match_partial(&self, normalized: &str) -> Option<&PredefinedPlace> {
        if let Some(place) = normalized
            .split(',')
            .map(str::trim)
            .find_map(|segment| self.get(segment))
        {
            return Some(place);
        }

        self.entries
            .iter()
            .find(|(key, _)| normalized.contains(key.as_str()) || key.contains(normalized))
            .map(|(_, place)| place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_keep_order() {
        let table = PlaceTable::us_defaults();
        assert_eq!(table.len(), US_PLACES.len());
        assert_eq!(
            table.suggestions(5),
            "phoenix, az, phoenix, phoenix arizona, tucson, az, tolleson, az"
        );
    }

    #[test]
    fn test_exact() {
        let table = PlaceTable::us_defaults();
        let place = table.match_exact("tolleson, az").unwrap();
        assert_eq!(place.lat, 33.4539);
        assert_eq!(place.lng, -112.2593);
        assert!(table.match_exact("Tolleson, AZ").is_none());
    }

    #[test]
    fn test_partial_by_segment() {
        let table = PlaceTable::us_defaults();
        let place = table
            .match_partial("10601 w van buren st, tolleson, az 85353")
            .unwrap();
        assert_eq!(place.display_name, "Tolleson, AZ");
    }

    #[test]
    fn test_partial_by_substring() {
        let table = PlaceTable::us_defaults();

        // Input contains a key
        let place = table.match_partial("downtown phoenix area").unwrap();
        assert_eq!(place.display_name, "Phoenix, AZ");

        // Key contains the input
        let place = table.match_partial("las veg").unwrap();
        assert_eq!(place.display_name, "Las Vegas, NV");
    }

    #[test]
    fn test_partial_first_key_wins() {
        let table = PlaceTable::us_defaults();
        // "arizona" and "phoenix arizona" both qualify; the earlier key wins
        let place = table.match_partial("arizon").unwrap();
        assert_eq!(place.display_name, "Phoenix, AZ");

        // "new york, ny" is defined before the state entry "new york"
        let place = table.match_partial("new").unwrap();
        assert_eq!(place.display_name, "New York, NY");

        let place = table.match_partial("greater new york").unwrap();
        assert_eq!(place.display_name, "New York");
    }

    #[test]
    fn test_no_match() {
        let table = PlaceTable::us_defaults();
        assert!(table.match_partial("anchorage, ak").is_none());
    }

    #[test]
    fn test_custom_table_normalizes_keys() {
        let table = PlaceTable::new(vec![(
            "  Boise, ID ",
            PredefinedPlace {
                lat: 43.615,
                lng: -116.2023,
                display_name: "Boise, ID".to_string(),
            },
        )]);
        assert!(table.match_exact("boise, id").is_some());
    }
}
