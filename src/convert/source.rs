//! Fetching and unpacking the Digital Obstacle File.

use std::io::{Cursor, Read};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use reqwest::Client;
use tracing::info;
use url::Url;
use zip::ZipArchive;

use crane_radar::feed::FeedSource;

/// Daily DOF snapshot published by FAA Aeronautical Information Services
pub const DAILY_DOF_URL: &str = "https://aeronav.faa.gov/Obst_Data/DAILY_DOF_CSV.ZIP";

/// The daily archive is large; allow five minutes for the download
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];

/// Raw bytes plus the name used to guess their packaging
pub struct DofBytes {
    pub name: String,
    pub bytes: Vec<u8>,
}

pub async fn fetch(source: &FeedSource) -> Result<DofBytes> {
    match source {
        FeedSource::Path(path) => {
            let bytes = tokio::fs::read(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            Ok(DofBytes {
                name: path.display().to_string(),
                bytes,
            })
        }
        FeedSource::Url(url) => download(url).await,
    }
}

async fn download(url: &Url) -> Result<DofBytes> {
    info!("Downloading FAA DOF data from {}", url);

    let client = Client::builder()
        .user_agent("crane-radar dof-convert")
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(url.clone())
        .send()
        .await
        .context("DOF download failed")?
        .error_for_status()
        .context("DOF download failed")?;
    let bytes = response.bytes().await.context("DOF download failed")?;
    info!("Downloaded {} bytes", bytes.len());

    Ok(DofBytes {
        name: url.path().to_string(),
        bytes: bytes.to_vec(),
    })
}

fn has_extension(name: &str, ext: &str) -> bool {
    Path::new(name)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// CSV text from a plain, gzipped or zipped DOF file.
///
/// Packaging is recognised by extension or by magic bytes. Archives yield
/// their first `.csv` entry.
pub fn csv_text(dof: &DofBytes) -> Result<String> {
    let bytes = if has_extension(&dof.name, "zip") || dof.bytes.starts_with(ZIP_MAGIC) {
        first_csv_in_zip(&dof.bytes)?
    } else if has_extension(&dof.name, "gz") || dof.bytes.starts_with(GZIP_MAGIC) {
        let mut out = Vec::new();
        GzDecoder::new(dof.bytes.as_slice())
            .read_to_end(&mut out)
            .context("Failed to decompress DOF file")?;
        out
    } else {
        dof.bytes.clone()
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn first_csv_in_zip(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).context("Invalid ZIP archive")?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_file() && has_extension(entry.name(), "csv") {
            info!("Extracting {}", entry.name());
            let mut out = Vec::new();
            entry.read_to_end(&mut out)?;
            return Ok(out);
        }
    }

    bail!("No CSV file found in the ZIP archive")
}
