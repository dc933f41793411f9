//! Census API Server
//!
//! Run with: cargo run --bin census
//!
//! # Configuration
//!
//! Read from the first config file found (see [`census::config::Config::load_default`]),
//! then overridden by environment variables:
//! - `CENSUS_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `CENSUS_API_PORT`: Port to listen on (default: 8080)
//! - `CENSUS_RECORDS_PATH`: JSON file of people (default: built-in roster)
//! - `CENSUS_LOG_LEVEL`: Log level (default: info)
//! - `CENSUS_LOG_FORMAT`: `pretty` or `json` (default: pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over `CENSUS_LOG_LEVEL`

use census::api::{serve, ApiConfig, AppState};
use census::config::{Config, LoggingConfig};
use census::store::RecordStore;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();
    init_tracing(&config.logging);

    tracing::info!("Starting Census API server v{}", env!("CARGO_PKG_VERSION"));

    // Build the record store
    let store = match &config.store.records_path {
        Some(path) => RecordStore::from_json_file(path)?,
        None => {
            tracing::info!("No records_path configured, serving the built-in roster");
            RecordStore::seed()
        }
    };
    tracing::info!("Record store ready with {} people", store.len());

    let api_config = ApiConfig::from(&config.api);
    let state = AppState::new(Arc::new(store), api_config.clone());

    tracing::info!("Starting server on {}:{}", api_config.host, api_config.port);
    serve(state, &api_config).await?;

    tracing::info!("Census API server stopped");
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "census={},tower_http=debug",
            logging.level
        ))
    });

    if logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
