//! Bundled sample filings served when the live feed cannot be loaded.

use crate::models::{CraneRecord, HEIGHT_UNIT};

// (id, lat, lng, height, status, start, end, sponsor)
#[rustfmt::skip]
const SAMPLES: &[(&str, f64, f64, i32, &str, &str, &str, &str)] = &[
    ("2023-WSW-1234-OE", 33.4476, -112.2562, 190, "Active", "2025-05-15", "2025-08-15", "ABC Construction Co."),
    ("2023-WSW-1235-OE", 33.4506, -112.2682, 210, "Active", "2025-04-01", "2025-07-30", "XYZ Builders Inc."),
    ("2023-WSW-1236-OE", 33.4356, -112.2492, 175, "Active", "2025-05-01", "2025-09-15", "Phoenix Development LLC"),
    ("2023-WSW-1237-OE", 33.4556, -112.2392, 185, "Pending", "2025-06-15", "2025-10-30", "Desert Construction Inc."),
    ("2023-WSW-1238-OE", 33.4656, -112.2792, 195, "Active", "2025-03-15", "2025-08-01", "Southwest Builders Group"),
    ("2023-WSW-1239-OE", 33.4386, -112.2462, 160, "Active", "2025-05-01", "2025-08-30", "Valley Builders LLC"),
    ("2023-WSW-1240-OE", 33.4526, -112.2532, 205, "Active", "2025-04-15", "2025-07-15", "Metro Construction Group"),
    ("2023-WSW-1241-OE", 33.4406, -112.2612, 180, "Pending", "2025-06-01", "2025-09-01", "Desert Crane Services"),
    ("2023-WSW-1242-OE", 33.4496, -112.2402, 215, "Active", "2025-03-01", "2025-08-15", "Arizona Building Co."),
    ("2023-WSW-1243-OE", 33.4536, -112.2712, 170, "Active", "2025-05-15", "2025-09-30", "Western Crane Rentals"),
    ("2023-WSW-1244-OE", 33.4436, -112.2482, 200, "Active", "2025-04-01", "2025-08-01", "Southwestern Development Inc."),
    ("2023-WSW-1245-OE", 33.4576, -112.2432, 185, "Pending", "2025-06-15", "2025-10-15", "Maricopa Construction LLC"),
    ("2023-WSW-1246-OE", 33.4626, -112.2572, 195, "Active", "2025-03-15", "2025-07-30", "Phoenix Metro Builders"),
    ("2023-WSW-1247-OE", 33.4676, -112.2512, 175, "Active", "2025-05-01", "2025-09-15", "Arizona Urban Development"),
    ("2023-WSW-1248-OE", 33.4416, -112.2642, 210, "Active", "2025-04-15", "2025-08-15", "Grand Avenue Construction"),
];

/// Sample cranes around Tolleson, AZ
pub fn sample_cranes() -> Vec<CraneRecord> {
    SAMPLES
        .iter()
        .map(
            |&(id, latitude, longitude, height, status, start, end, sponsor)| CraneRecord {
                id: id.to_string(),
                structure_type: "Crane".to_string(),
                latitude,
                longitude,
                height,
                height_unit: HEIGHT_UNIT.to_string(),
                status: status.to_string(),
                start_date: start.to_string(),
                end_date: end.to_string(),
                sponsor: sponsor.to_string(),
                city: "Tolleson".to_string(),
                state: "AZ".to_string(),
            },
        )
        .collect()
}
