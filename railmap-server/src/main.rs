use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use railmap_server::cache::CachedDatasets;
use railmap_server::config::ServerConfig;
use railmap_server::geojson::Dataset;
use railmap_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "railmap_server=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::parse();
    config.validate()?;

    // Both datasets must load before we accept any request
    let rail = Dataset::load(config.rail_path()).context("load railroad GeoJSON")?;
    let stations = Dataset::load(config.station_path()).context("load station GeoJSON")?;

    let datasets = CachedDatasets::new(rail, stations, &config.cache());
    let state = AppState::new(datasets);
    let app = create_router(state, config.static_dir());

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("bind {}", config.addr))?;
    info!(addr = %config.addr, static_dir = %config.static_dir().display(), "serving");

    axum::serve(listener, app).await.context("server exited")?;
    Ok(())
}
