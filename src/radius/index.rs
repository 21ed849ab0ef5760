//! Spatial index for radius queries over a crane record set.

use rstar::{RTree, RTreeObject, AABB};
use serde::Serialize;
use tracing::debug;

use super::{distance_nm, EARTH_RADIUS_NM};
use crate::models::{CraneRecord, GeoPoint};

/// Slack added to query envelopes so float rounding never excludes a
/// record sitting exactly on the radius.
const ENVELOPE_PAD_DEG: f64 = 1e-6;

/// Record indexed by its (lon, lat) position
struct IndexedCrane {
    idx: usize,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedCrane {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// A record together with its distance from the search origin
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearbyCrane {
    #[serde(flatten)]
    pub record: CraneRecord,
    pub distance_nm: f64,
}

/// R-tree over crane positions
pub struct CraneIndex {
    records: Vec<CraneRecord>,
    tree: RTree<IndexedCrane>,
}

impl CraneIndex {
    pub fn build(records: Vec<CraneRecord>) -> Self {
        let indexed: Vec<IndexedCrane> = records
            .iter()
            .enumerate()
            .map(|(idx, r)| IndexedCrane {
                idx,
                envelope: AABB::from_point([r.longitude, r.latitude]),
            })
            .collect();

        let tree = RTree::bulk_load(indexed);
        debug!("Crane index built with {} entries", tree.size());

        Self { records, tree }
    }

    /// Records within `radius_nm` of `center`, nearest first.
    ///
    /// Candidates come from a lon/lat envelope that bounds the circle; the
    /// haversine test then decides membership, so the result is the same set
    /// [`within_radius`](super::within_radius) would select.
    pub fn within_radius(&self, center: GeoPoint, radius_nm: f64) -> Vec<NearbyCrane> {
        if radius_nm.is_nan() || radius_nm < 0.0 {
            return Vec::new();
        }

        let envelope = query_envelope(center, radius_nm);
        let mut hits: Vec<NearbyCrane> = self
            .tree
            .locate_in_envelope_intersecting(&envelope)
            .filter_map(|ic| {
                let record = &self.records[ic.idx];
                let d = distance_nm(center, record.point());
                (d <= radius_nm).then(|| NearbyCrane {
                    record: record.clone(),
                    distance_nm: d,
                })
            })
            .collect();

        hits.sort_by(|a, b| a.distance_nm.total_cmp(&b.distance_nm));
        hits
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CraneRecord] {
        &self.records
    }
}

/// Lon/lat box containing every point within `radius_nm` of `center`.
///
/// Uses the bounding-coordinates construction for a spherical cap. Caps that
/// reach a pole or cross the antimeridian widen to the full longitude range.
fn query_envelope(center: GeoPoint, radius_nm: f64) -> AABB<[f64; 2]> {
    let angular = radius_nm / EARTH_RADIUS_NM;
    let dlat = angular.to_degrees() + ENVELOPE_PAD_DEG;

    let min_lat = (center.latitude - dlat).max(-90.0);
    let max_lat = (center.latitude + dlat).min(90.0);

    let full_lon = ([-180.0, min_lat], [180.0, max_lat]);
    let (lower, upper) = if angular >= std::f64::consts::FRAC_PI_2
        || center.latitude - dlat <= -90.0
        || center.latitude + dlat >= 90.0
    {
        full_lon
    } else {
        let ratio = angular.sin() / center.latitude.to_radians().cos();
        if ratio >= 1.0 {
            full_lon
        } else {
            let dlon = ratio.asin().to_degrees() + ENVELOPE_PAD_DEG;
            let (west, east) = (center.longitude - dlon, center.longitude + dlon);
            if west < -180.0 || east > 180.0 {
                full_lon
            } else {
                ([west, min_lat], [east, max_lat])
            }
        }
    };

    AABB::from_corners(lower, upper)
}
