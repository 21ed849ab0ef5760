//! Digital Obstacle File to crane datafile mapping.

use chrono::NaiveDate;
use serde::Serialize;

use crane_radar::coords::{format_dms, parse_decimal, Axis};
use crane_radar::feed::RawRow;

const TYPE_KEYWORDS: &[&str] = &["CRANE", "MOBILE", "EQUIPMENT", "VEHICLE"];
const ACTION_KEYWORDS: &[&str] = &["TEMP", "CONSTRUCTION"];

/// Structure type given to obstacles whose DOF type does not mention a crane
const MOBILE_CRANE_TYPE: &str = "CRANE$MOBILE";

/// One output row in the DMS datafile layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatafileRow {
    #[serde(rename = "STUDY (ASN)")]
    pub study: String,
    #[serde(rename = "STATUS")]
    pub status: String,
    #[serde(rename = "DETERMINATION")]
    pub determination: String,
    #[serde(rename = "ENTERED DATE")]
    pub entered_date: String,
    #[serde(rename = "EXPIRATION DATE")]
    pub expiration_date: String,
    #[serde(rename = "LATITUDE")]
    pub latitude: String,
    #[serde(rename = "LONGITUTDE")]
    pub longitude: String,
    #[serde(rename = "SURVEY_ACCURACY")]
    pub survey_accuracy: String,
    #[serde(rename = "MARKING LIGHTING TYPE")]
    pub lighting: String,
    #[serde(rename = "STRUCTURE CITY")]
    pub city: String,
    #[serde(rename = "STRUCTURE STATE")]
    pub state: String,
    #[serde(rename = "NOTICE OF")]
    pub notice_of: String,
    #[serde(rename = "DURATION")]
    pub duration: String,
    #[serde(rename = "WORK SCHEDULE BEGINNING DATE")]
    pub work_start: String,
    #[serde(rename = "WORK SCHEDULE ENDING DATE")]
    pub work_end: String,
    #[serde(rename = "STRUCTURE TYPE")]
    pub structure_type: String,
    #[serde(rename = "AGL HEIGHT DET")]
    pub agl_height_det: String,
    #[serde(rename = "AGL HEIGHT PROPOSED")]
    pub agl_height_proposed: String,
    #[serde(rename = "ELEVATION")]
    pub elevation: String,
    #[serde(rename = "AMSL HEIGHT DET")]
    pub amsl_height_det: String,
    #[serde(rename = "SPONSOR NAME ")]
    pub sponsor: String,
}

fn cell<'a>(row: &'a RawRow, column: &str) -> &'a str {
    row.get(column).map(|v| v.trim()).unwrap_or_default()
}

fn contains_any(value: &str, keywords: &[&str]) -> bool {
    let upper = value.to_ascii_uppercase();
    keywords.iter().any(|k| upper.contains(k))
}

/// Crane, mobile equipment or temporary construction obstacles
pub fn is_crane_like(row: &RawRow) -> bool {
    contains_any(cell(row, "TYPE"), TYPE_KEYWORDS)
        || contains_any(cell(row, "ACTION"), ACTION_KEYWORDS)
}

/// Crane-like rows, or every row when the file has none
pub fn select_rows(rows: &[RawRow]) -> Vec<&RawRow> {
    let selected: Vec<&RawRow> = rows.iter().filter(|r| is_crane_like(r)).collect();
    if selected.is_empty() {
        rows.iter().collect()
    } else {
        selected
    }
}

/// Decimal columns win; DMS columns are copied as-is otherwise
fn coordinates(row: &RawRow) -> Option<(String, String)> {
    let decimal = parse_decimal(cell(row, "LATDEC")).zip(parse_decimal(cell(row, "LONDEC")));
    if let Some((lat, lon)) = decimal {
        return Some((
            format_dms(lat, Axis::Latitude),
            format_dms(lon, Axis::Longitude),
        ));
    }

    let (lat, lon) = (cell(row, "DMSLAT"), cell(row, "DMSLON"));
    if lat.is_empty() || lon.is_empty() {
        return None;
    }
    Some((lat.to_string(), lon.to_string()))
}

/// Map one DOF row. `None` when it has no usable coordinates.
pub fn convert_row(row: &RawRow, today: NaiveDate) -> Option<DatafileRow> {
    let (latitude, longitude) = coordinates(row)?;

    let dof_type = cell(row, "TYPE");
    let structure_type = if dof_type.to_ascii_uppercase().contains("CRANE") {
        dof_type.to_string()
    } else {
        MOBILE_CRANE_TYPE.to_string()
    };

    let lighting = match cell(row, "LIGHTING") {
        "" => "None",
        l => l,
    };
    let accuracy = match cell(row, "ACCURACY") {
        "" => "4D",
        a => a,
    };
    let amsl = cell(row, "AMSL").to_string();

    Some(DatafileRow {
        study: cell(row, "OAS").to_string(),
        status: "Determined".to_string(),
        determination: "No Hazard".to_string(),
        entered_date: today.format("%Y-%m-%d").to_string(),
        expiration_date: String::new(),
        latitude,
        longitude,
        survey_accuracy: accuracy.to_string(),
        lighting: lighting.to_string(),
        city: cell(row, "CITY").to_string(),
        state: cell(row, "STATE").to_string(),
        notice_of: "Existing".to_string(),
        duration: "Permanent".to_string(),
        work_start: String::new(),
        work_end: String::new(),
        structure_type,
        agl_height_det: cell(row, "AGL").to_string(),
        agl_height_proposed: String::new(),
        elevation: amsl.clone(),
        amsl_height_det: amsl,
        sponsor: String::new(),
    })
}
