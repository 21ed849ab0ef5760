//! FAA Digital Obstacle File converter.
//!
//! Reads a DOF CSV export (plain, gzipped, or the FAA daily ZIP, from disk or
//! over HTTP), keeps crane and temporary
//! construction obstacles, and writes them in the DMS datafile layout the
//! crane feed pipeline reads.

mod dof;
mod source;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crane_radar::feed::{parse_rows, FeedSource};

use crate::dof::{convert_row, is_crane_like, select_rows};

#[derive(Parser, Debug)]
#[command(name = "dof-convert")]
#[command(about = "Convert an FAA Digital Obstacle File into the crane datafile format")]
struct Args {
    /// DOF path or URL (.csv, .csv.gz or .zip)
    #[arg(short, long, default_value = source::DAILY_DOF_URL)]
    input: String,

    /// Output datafile
    #[arg(short, long, default_value = "data/datafile.csv")]
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("DOF converter");
    info!("Input: {}", args.input);

    let dof = source::fetch(&FeedSource::parse(&args.input)).await?;
    let text = source::csv_text(&dof)?;
    let rows = parse_rows(&text);
    info!("Loaded {} records from DOF", rows.len());

    let selected = select_rows(&rows);
    if !rows.iter().any(is_crane_like) {
        warn!("No crane-related records found, converting all records");
    } else {
        info!(
            "Found {} potential crane/construction records from {} total records",
            selected.len(),
            rows.len()
        );
    }

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("Failed to open {}", args.output.display()))?;

    let pb = ProgressBar::new(selected.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let today = Local::now().date_naive();
    let mut written = 0usize;
    let mut dropped = 0usize;
    for row in selected {
        match convert_row(row, today) {
            Some(out) => {
                writer.serialize(&out)?;
                written += 1;
            }
            None => dropped += 1,
        }
        pb.inc(1);
    }
    writer.flush()?;
    pb.finish_with_message("Conversion complete");

    info!(
        "Wrote {} records to {} ({} without coordinates dropped)",
        written,
        args.output.display(),
        dropped
    );
    Ok(())
}
