//! CSV ingestion: fetch, parse, filter, transform.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use csv::ReaderBuilder;
use rayon::prelude::*;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};
use url::Url;

use super::{sample_cranes, FeedFormat, RawRow, RecordTransformer, StructureTypeFilter};
use crate::error::FeedError;
use crate::models::CraneRecord;

/// Where the CSV text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    Path(PathBuf),
    Url(Url),
}

impl FeedSource {
    /// `http(s)://` strings are URLs, `file://` URLs and everything else
    /// are file paths
    pub fn parse(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => FeedSource::Url(url),
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => FeedSource::Path(path),
                Err(()) => FeedSource::Path(PathBuf::from(source)),
            },
            _ => FeedSource::Path(PathBuf::from(source)),
        }
    }
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeedSource::Path(path) => write!(f, "{}", path.display()),
            FeedSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct FeedResult {
    pub records: Vec<CraneRecord>,
    /// True when `records` is the bundled sample set
    pub used_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Turns a CSV feed into crane records.
///
/// The format, row filter and fallback dataset are fixed at construction, so
/// [`records_from_text`](Self::records_from_text) is a pure function of the
/// pipeline and its input.
#[derive(Clone)]
pub struct CsvIngestionPipeline {
    transformer: RecordTransformer,
    filter: StructureTypeFilter,
    fallback: Arc<[CraneRecord]>,
    client: Client,
}

impl CsvIngestionPipeline {
    pub fn new(format: FeedFormat) -> Self {
        Self {
            transformer: RecordTransformer::new(format),
            filter: StructureTypeFilter::cranes(),
            fallback: sample_cranes().into(),
            client: Client::builder()
                .user_agent("crane-radar/0.1 (FAA crane feed)")
                .timeout(Duration::from_secs(60))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    pub fn with_filter(mut self, filter: StructureTypeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_fallback(mut self, fallback: Vec<CraneRecord>) -> Self {
        self.fallback = fallback.into();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn format(&self) -> FeedFormat {
        self.transformer.format()
    }

    pub fn fallback(&self) -> &[CraneRecord] {
        &self.fallback
    }

    /// Load the feed. Never fails: any transport or parse failure yields the
    /// fallback dataset with `used_fallback` set and the reason in `error`.
    pub async fn ingest(&self, source: &FeedSource) -> FeedResult {
        let result = match self.fetch_text(source).await {
            Ok(text) => self.records_from_text(&text),
            Err(e) => Err(e),
        };

        match result {
            Ok(records) => FeedResult {
                records,
                used_fallback: false,
                error: None,
            },
            Err(e) => {
                warn!("Crane feed {} unavailable, using sample data: {}", source, e);
                FeedResult {
                    records: self.fallback.to_vec(),
                    used_fallback: true,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Retrieve raw CSV text from a file or over HTTP
    pub async fn fetch_text(&self, source: &FeedSource) -> Result<String, FeedError> {
        match source {
            FeedSource::Path(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FeedError::Io {
                        path: path.display().to_string(),
                        source,
                    })
            }
            FeedSource::Url(url) => {
                debug!("Fetching crane feed from {}", url);
                let response = self.client.get(url.clone()).send().await?;
                if !response.status().is_success() {
                    return Err(FeedError::Status(response.status()));
                }
                Ok(response.text().await?)
            }
        }
    }

    /// Parse, filter and transform CSV text. Fails only when the text holds
    /// no data rows at all; malformed rows are skipped silently.
    pub fn records_from_text(&self, text: &str) -> Result<Vec<CraneRecord>, FeedError> {
        let rows = parse_rows(text);
        if rows.is_empty() {
            return Err(FeedError::Empty);
        }
        info!("CSV parsed, total rows: {}", rows.len());

        let records: Vec<CraneRecord> = rows
            .par_iter()
            .filter(|row| self.transformer.is_selected(row, &self.filter))
            .filter_map(|row| self.transformer.transform(row))
            .collect();

        info!("Transformed {} crane entries", records.len());
        Ok(records)
    }
}

/// Parse header-delimited text into rows keyed by trimmed header name.
///
/// Rows may be shorter or longer than the header; extra cells are ignored
/// and missing ones are simply absent. A header that cannot be read yields
/// no rows.
pub fn parse_rows(text: &str) -> Vec<RawRow> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = match reader.headers() {
        Ok(h) => h.iter().map(|name| name.trim().to_string()).collect(),
        Err(e) => {
            warn!("Unreadable CSV header: {}", e);
            return Vec::new();
        }
    };

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };

        // A blank line shows up as a single empty cell
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(name, cell)| (name.clone(), cell.to_string()))
            .collect();
        rows.push(row);
    }

    if skipped > 0 {
        debug!("Skipped {} unreadable CSV rows", skipped);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DECIMAL_CSV: &str = "\
STUDY (ASN),STRUCTURE TYPE,LATITUDE,LONGITUDE,AGL HEIGHT PROPOSED,AGL HEIGHT DET,STATUS,SPONSOR NAME,STRUCTURE CITY,STRUCTURE STATE
2025-AWP-1-OE,CRANE$MOBILE,33.4476,-112.2562,190,,Determined,ABC,TOLLESON,AZ
2025-AWP-2-OE,ANTENNA TOWER,33.4500,-112.2500,300,,Determined,Radio Co,TOLLESON,AZ
2025-AWP-3-OE,Crane,,-112.2600,150,,Work In Progress,XYZ,PHOENIX,AZ
2025-AWP-4-OE,crane,north,-112.2600,150,,Determined,XYZ,PHOENIX,AZ
2025-AWP-5-OE,TOWER CRANE,33.4600,-112.2700,,175,,,PHOENIX,AZ
";

    #[test]
    fn test_source_parse() {
        assert_eq!(
            FeedSource::parse("data/datafile.csv"),
            FeedSource::Path(PathBuf::from("data/datafile.csv"))
        );
        assert!(matches!(
            FeedSource::parse("https://example.com/datafile.csv"),
            FeedSource::Url(_)
        ));
        // Windows drive letters parse as URL schemes
        assert!(matches!(
            FeedSource::parse("C:/data/datafile.csv"),
            FeedSource::Path(_)
        ));
    }

    #[test]
    fn test_records_from_text() {
        let pipeline = CsvIngestionPipeline::new(FeedFormat::Decimal);
        let records = pipeline.records_from_text(DECIMAL_CSV).unwrap();

        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2025-AWP-1-OE", "2025-AWP-5-OE"]);
        assert_eq!(records[1].height, 175);
        assert_eq!(records[1].status, "Unknown");
        assert_eq!(records[1].sponsor, "");
    }

    #[test]
    fn test_ragged_rows_tolerated() {
        let text = "STRUCTURE TYPE,LATITUDE,LONGITUDE,STATUS\n\
                    CRANE,33.1,-112.1\n\
                    CRANE,33.2,-112.2,Determined,extra,cells\n";
        let pipeline = CsvIngestionPipeline::new(FeedFormat::Decimal);
        let records = pipeline.records_from_text(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, "Unknown");
        assert_eq!(records[1].status, "Determined");
    }

    #[test]
    fn test_duplicate_ids_kept() {
        let text = "STUDY (ASN),STRUCTURE TYPE,LATITUDE,LONGITUDE\n\
                    A,CRANE,33.1,-112.1\n\
                    A,CRANE,33.2,-112.2\n";
        let pipeline = CsvIngestionPipeline::new(FeedFormat::Decimal);
        assert_eq!(pipeline.records_from_text(text).unwrap().len(), 2);
    }

    #[test]
    fn test_padded_headers() {
        let text = "STRUCTURE TYPE,LATITUDE,LONGITUTDE,SPONSOR NAME \n\
                    CRANE$MOBILE,33 - 27 - 28.73 N,112 - 15 - 33.48 W,Acme\n";
        let pipeline = CsvIngestionPipeline::new(FeedFormat::Dms);
        let records = pipeline.records_from_text(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sponsor, "Acme");
    }

    #[test]
    fn test_no_rows_is_an_error() {
        let pipeline = CsvIngestionPipeline::new(FeedFormat::Decimal);
        assert!(matches!(
            pipeline.records_from_text(""),
            Err(FeedError::Empty)
        ));
        assert!(matches!(
            pipeline.records_from_text("STRUCTURE TYPE,LATITUDE,LONGITUDE\n"),
            Err(FeedError::Empty)
        ));
    }

    #[test]
    fn test_rows_without_cranes_is_not_an_error() {
        let text = "STRUCTURE TYPE,LATITUDE,LONGITUDE\nANTENNA,33.1,-112.1\n";
        let pipeline = CsvIngestionPipeline::new(FeedFormat::Decimal);
        assert!(pipeline.records_from_text(text).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ingest_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DECIMAL_CSV.as_bytes()).unwrap();

        let pipeline = CsvIngestionPipeline::new(FeedFormat::Decimal);
        let result = pipeline
            .ingest(&FeedSource::Path(file.path().to_path_buf()))
            .await;

        assert!(!result.used_fallback);
        assert!(result.error.is_none());
        assert_eq!(result.records.len(), 2);
    }

    #[tokio::test]
    async fn test_ingest_from_file_url() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DECIMAL_CSV.as_bytes()).unwrap();

        let url = Url::from_file_path(file.path()).unwrap();
        let source = FeedSource::parse(url.as_str());
        assert_eq!(source, FeedSource::Path(file.path().to_path_buf()));

        let result = CsvIngestionPipeline::new(FeedFormat::Decimal)
            .ingest(&source)
            .await;
        assert!(!result.used_fallback);
        assert_eq!(result.records.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = CsvIngestionPipeline::new(FeedFormat::Dms);
        let result = pipeline
            .ingest(&FeedSource::Path(dir.path().join("missing.csv")))
            .await;

        assert!(result.used_fallback);
        assert_eq!(result.records, sample_cranes());
        assert!(result.error.unwrap().contains("missing.csv"));
    }

    #[tokio::test]
    async fn test_custom_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = CsvIngestionPipeline::new(FeedFormat::Dms).with_fallback(Vec::new());
        let result = pipeline
            .ingest(&FeedSource::Path(dir.path().join("missing.csv")))
            .await;

        assert!(result.used_fallback);
        assert!(result.records.is_empty());
    }
}
