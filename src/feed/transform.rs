//! Row to [`CraneRecord`] mapping.

use hashbrown::HashMap;

use super::FeedFormat;
use crate::models::{CraneRecord, HEIGHT_UNIT};

/// One parsed CSV row: trimmed header name -> cell text
pub type RawRow = HashMap<String, String>;

/// Look up a cell, treating blank cells like missing ones
fn field<'a>(row: &'a RawRow, column: &str) -> Option<&'a str> {
    row.get(column)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

fn text(row: &RawRow, column: &str) -> String {
    field(row, column).unwrap_or_default().to_string()
}

/// First non-blank of two columns, or an empty string
fn text_or(row: &RawRow, primary: &str, fallback: &str) -> String {
    field(row, primary)
        .or_else(|| field(row, fallback))
        .unwrap_or_default()
        .to_string()
}

/// Leading integer of a height cell, so `"190.0"` and `"190 ft"` are 190.
/// Text with no leading digits is 0.
fn parse_height(raw: &str) -> i32 {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    match digits.parse::<i32>() {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => 0,
    }
}

/// Case-insensitive substring match on the structure-type column
#[derive(Debug, Clone)]
pub struct StructureTypeFilter {
    needle: String,
}

impl StructureTypeFilter {
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }

    /// Keep rows whose structure type mentions "crane"
    pub fn cranes() -> Self {
        Self::new("crane")
    }

    pub fn matches(&self, structure_type: &str) -> bool {
        structure_type.to_lowercase().contains(&self.needle)
    }
}

impl Default for StructureTypeFilter {
    fn default() -> Self {
        Self::cranes()
    }
}

/// Maps raw rows of one feed format into crane records
#[derive(Debug, Clone, Copy)]
pub struct RecordTransformer {
    format: FeedFormat,
}

impl RecordTransformer {
    pub fn new(format: FeedFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> FeedFormat {
        self.format
    }

    /// Whether the row's structure type passes `filter`
    pub fn is_selected(&self, row: &RawRow, filter: &StructureTypeFilter) -> bool {
        field(row, self.format.columns().structure_type)
            .map(|value| filter.matches(value))
            .unwrap_or(false)
    }

    /// Build a record, or `None` when either coordinate is missing or
    /// unparsable in this format's encoding.
    pub fn transform(&self, row: &RawRow) -> Option<CraneRecord> {
        let cols = self.format.columns();
        let mode = self.format.coordinate_mode();

        let latitude = field(row, cols.latitude).and_then(|v| mode.parse(v))?;
        let longitude = field(row, cols.longitude).and_then(|v| mode.parse(v))?;

        let height = field(row, cols.height_proposed)
            .or_else(|| field(row, cols.height_determined))
            .map(parse_height)
            .unwrap_or(0);

        Some(CraneRecord {
            id: text(row, cols.id),
            structure_type: "Crane".to_string(),
            latitude,
            longitude,
            height,
            height_unit: HEIGHT_UNIT.to_string(),
            status: field(row, cols.status).unwrap_or("Unknown").to_string(),
            start_date: text_or(row, cols.start_date, cols.start_date_fallback),
            end_date: text_or(row, cols.end_date, cols.end_date_fallback),
            sponsor: text(row, cols.sponsor),
            city: text(row, cols.city),
            state: text(row, cols.state),
        })
    }
}
