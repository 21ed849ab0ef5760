use super::Axis;

/// Parse a `"D - M - S.ss X"` string into signed decimal degrees.
///
/// Returns `None` unless there are exactly three `-` separated parts, every
/// number parses, and the direction is one of N, S, E or W. South and west
/// are negative.
pub fn parse_dms(raw: &str) -> Option<f64> {
    let parts: Vec<&str> = raw.split('-').map(str::trim).collect();
    if parts.len() != 3 {
        return None;
    }

    let degrees: f64 = parts[0].parse().ok()?;
    let minutes: f64 = parts[1].parse().ok()?;

    // Last part carries seconds and the hemisphere letter
    let mut tail = parts[2].split_whitespace();
    let seconds: f64 = tail.next()?.parse().ok()?;
    let direction = tail.next()?;
    if tail.next().is_some() {
        return None;
    }

    let negative = match direction.to_ascii_uppercase().as_str() {
        "N" | "E" => false,
        "S" | "W" => true,
        _ => return None,
    };

    let decimal = degrees + minutes / 60.0 + seconds / 3600.0;
    if !decimal.is_finite() {
        return None;
    }

    Some(if negative { -decimal } else { decimal })
}

/// Format decimal degrees as `"DD - MM - SS.ss X"`, the layout the DOF
/// derived datafile uses. Non-finite input formats as an empty string.
pub fn format_dms(value: f64, axis: Axis) -> String {
    if !value.is_finite() {
        return String::new();
    }

    let abs = value.abs();
    let degrees = abs.trunc();
    let minutes = ((abs - degrees) * 60.0).trunc();
    let seconds = ((abs - degrees) * 60.0 - minutes) * 60.0;

    let direction = match (axis, value < 0.0) {
        (Axis::Latitude, false) => 'N',
        (Axis::Latitude, true) => 'S',
        (Axis::Longitude, false) => 'E',
        (Axis::Longitude, true) => 'W',
    };

    format!(
        "{:02} - {:02} - {:05.2} {}",
        degrees as u32, minutes as u32, seconds, direction
    )
}
