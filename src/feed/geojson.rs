use serde_json::{json, Value};

use crate::models::CraneRecord;

/// Convert records to a GeoJSON FeatureCollection of points
pub fn cranes_to_geojson(records: &[CraneRecord]) -> Value {
    let features: Vec<Value> = records
        .iter()
        .map(|crane| {
            json!({
                "type": "Feature",
                "properties": {
                    "id": crane.id,
                    "structureType": crane.structure_type,
                    "height": crane.height,
                    "heightUnit": crane.height_unit,
                    "status": crane.status,
                    "startDate": crane.start_date,
                    "endDate": crane.end_date,
                    "sponsor": crane.sponsor,
                },
                "geometry": {
                    "type": "Point",
                    "coordinates": [crane.longitude, crane.latitude],
                }
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
