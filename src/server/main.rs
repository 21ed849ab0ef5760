//! HTTP API for crane searches.
//!
//! Serves radius searches and address resolution over JSON so a map front
//! end can plot filings around a user-entered address.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crane_radar::feed::FeedFormat;
use crane_radar::geocode::format_display_address;
use crane_radar::{Config, CraneSearch, GeocodeResult, SearchOutcome};

#[derive(Parser, Debug)]
#[command(name = "crane-server")]
#[command(about = "Crane search HTTP server")]
struct Args {
    /// Listen address
    #[arg(short, long, default_value = "0.0.0.0:3000")]
    listen: String,

    /// Config file
    #[arg(short, long, default_value = "crane-radar.toml")]
    config: PathBuf,

    /// Feed path or URL, overriding the config file
    #[arg(long)]
    source: Option<String>,

    /// Feed format, overriding the config file
    #[arg(long, value_enum)]
    format: Option<FeedFormat>,
}

/// Application state shared across handlers
struct AppState {
    search: CraneSearch,
    default_radius_nm: f64,
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

    info!("Crane Radar Server");

    let mut config = Config::load_or_default(Some(&args.config))?;
    if let Some(source) = args.source {
        config.feed.source = source;
    }
    if let Some(format) = args.format {
        config.feed.format = format;
    }
    info!("Feed: {} ({})", config.feed.source, config.feed.format);
    info!("Geocoder: {}", config.geocoder.endpoint);

    let state = Arc::new(AppState {
        search: CraneSearch::from_config(&config)?,
        default_radius_nm: config.search.default_radius_nm,
    });

    let app = router(state);

    info!("Starting server on {}", args.listen);

    let listener = tokio::net::TcpListener::bind(&args.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/cranes", get(cranes_handler))
        .route("/v1/geocode", get(geocode_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// 422 for input the caller can fix, 502 when an upstream service failed
fn api_error(validation: bool, message: String) -> ApiError {
    let status = if validation {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        error!("Upstream failure: {}", message);
        StatusCode::BAD_GATEWAY
    };
    (status, Json(ErrorResponse { error: message }))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
struct CranesQueryParams {
    /// Missing is treated like blank
    address: Option<String>,
    /// Nautical miles
    radius: Option<f64>,
}

async fn cranes_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CranesQueryParams>,
) -> Result<Json<SearchOutcome>, ApiError> {
    let radius = params.radius.unwrap_or(state.default_radius_nm);

    let outcome = state
        .search
        .search(params.address.as_deref().unwrap_or_default(), radius)
        .await
        .map_err(|e| api_error(e.is_validation(), e.to_string()))?;

    if outcome.used_fallback {
        warn!("Responding with sample crane data");
    }
    Ok(Json(outcome))
}

#[derive(Deserialize)]
struct GeocodeQueryParams {
    text: Option<String>,
}

#[derive(Serialize)]
struct GeocodeResponse {
    display_address: String,
    #[serde(flatten)]
    result: GeocodeResult,
}

async fn geocode_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeQueryParams>,
) -> Result<Json<GeocodeResponse>, ApiError> {
    let result = state
        .search
        .resolver()
        .resolve_validated(params.text.as_deref().unwrap_or_default())
        .await
        .map_err(|e| api_error(e.is_validation(), e.to_string()))?;

    Ok(Json(GeocodeResponse {
        display_address: format_display_address(&result),
        result,
    }))
}
