//! Command-line crane search.
//!
//! Resolves an address, loads the configured FAA feed and prints the cranes
//! filed within the requested radius, nearest first.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crane_radar::feed::{cranes_to_geojson, FeedFormat};
use crane_radar::{Config, CraneRecord, CraneSearch, SearchOutcome};

#[derive(Parser, Debug)]
#[command(name = "crane-search")]
#[command(about = "Find FAA-filed cranes near an address")]
struct Args {
    /// Address, city or state to search around
    #[arg(short, long)]
    address: String,

    /// Search radius in nautical miles (defaults to the configured radius)
    #[arg(short, long)]
    radius: Option<f64>,

    /// Config file
    #[arg(short, long, default_value = "crane-radar.toml")]
    config: PathBuf,

    /// Feed path or URL, overriding the config file
    #[arg(long)]
    source: Option<String>,

    /// Feed format, overriding the config file
    #[arg(long, value_enum)]
    format: Option<FeedFormat>,

    /// Print the full result as JSON
    #[arg(long, conflicts_with = "geojson")]
    json: bool,

    /// Print matching cranes as a GeoJSON FeatureCollection
    #[arg(long)]
    geojson: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = Config::load_or_default(Some(&args.config))?;
    if let Some(source) = args.source {
        config.feed.source = source;
    }
    if let Some(format) = args.format {
        config.feed.format = format;
    }
    let radius = args.radius.unwrap_or(config.search.default_radius_nm);

    info!("Feed: {} ({})", config.feed.source, config.feed.format);

    let search = CraneSearch::from_config(&config)?;
    let outcome = search
        .search(&args.address, radius)
        .await
        .context("Search failed")?;

    if outcome.used_fallback {
        warn!("Live FAA data unavailable; showing sample data");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if args.geojson {
        let records: Vec<CraneRecord> = outcome.cranes.iter().map(|c| c.record.clone()).collect();
        println!("{}", serde_json::to_string_pretty(&cranes_to_geojson(&records))?);
    } else {
        print_table(&outcome);
    }

    Ok(())
}

fn print_table(outcome: &SearchOutcome) {
    println!(
        "{} crane(s) within {} NM of {} ({:.4}, {:.4})",
        outcome.cranes.len(),
        outcome.radius_nm,
        outcome.location.address,
        outcome.location.lat,
        outcome.location.lng
    );
    if outcome.cranes.is_empty() {
        return;
    }

    println!();
    println!(
        "{:<20} {:>8} {:>12} {:<10} {:<12} {:<12} {}",
        "ID", "DIST NM", "HEIGHT", "STATUS", "START", "END", "SPONSOR"
    );
    for crane in &outcome.cranes {
        let r = &crane.record;
        println!(
            "{:<20} {:>8.2} {:>12} {:<10} {:<12} {:<12} {}",
            r.id,
            crane.distance_nm,
            format!("{} {}", r.height, r.height_unit),
            r.status,
            r.start_date,
            r.end_date,
            r.sponsor
        );
    }
}
