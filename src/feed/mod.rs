//! FAA crane feed ingestion.

mod fallback;
mod format;
mod geojson;
mod pipeline;
mod transform;

pub use fallback::sample_cranes;
pub use format::{ColumnMap, FeedFormat};
pub use geojson::cranes_to_geojson;
pub use pipeline::{parse_rows, CsvIngestionPipeline, FeedResult, FeedSource};
pub use transform::{RawRow, RecordTransformer, StructureTypeFilter};
