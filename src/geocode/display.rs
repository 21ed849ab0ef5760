use crate::models::GeocodeResult;

/// Short human-readable label: "house road, city, state, postcode".
/// Falls back to the service's display name when no parts are known.
pub fn format_display_address(result: &GeocodeResult) -> String {
    let addr = &result.address;
    let mut parts: Vec<String> = Vec::new();

    match (&addr.house_number, &addr.road) {
        (Some(number), Some(road)) => parts.push(format!("{} {}", number, road)),
        (None, Some(road)) => parts.push(road.clone()),
        _ => {}
    }

    for part in [&addr.city, &addr.state, &addr.postcode].into_iter().flatten() {
        if !part.is_empty() {
            parts.push(part.clone());
        }
    }

    if parts.is_empty() {
        result.display_name.clone()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GeocodeAddress;

    fn result(address: GeocodeAddress) -> GeocodeResult {
        GeocodeResult {
            latitude: 33.4456,
            longitude: -112.2592,
            display_name: "Somewhere, United States".to_string(),
            address,
            bounding_box: None,
            confidence: 0.5,
        }
    }

    #[test]
    fn test_full_address() {
        let r = result(GeocodeAddress {
            house_number: Some("10601".into()),
            road: Some("West Van Buren Street".into()),
            city: Some("Tolleson".into()),
            state: Some("Arizona".into()),
            postcode: Some("85353".into()),
            country: "United States".into(),
        });
        assert_eq!(
            format_display_address(&r),
            "10601 West Van Buren Street, Tolleson, Arizona, 85353"
        );
    }

    #[test]
    fn test_house_number_without_road_skipped() {
        let r = result(GeocodeAddress {
            house_number: Some("10601".into()),
            city: Some("Tolleson".into()),
            country: "United States".into(),
            ..Default::default()
        });
        assert_eq!(format_display_address(&r), "Tolleson");
    }

    #[test]
    fn test_falls_back_to_display_name() {
        let r = result(GeocodeAddress {
            country: "United States".into(),
            ..Default::default()
        });
        assert_eq!(format_display_address(&r), "Somewhere, United States");
    }
}
