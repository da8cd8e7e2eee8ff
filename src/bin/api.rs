//! COVID-19 Dashboard API Server
//!
//! Run with: cargo run --bin covid-dashboard-api
//!
//! # Configuration
//!
//! Reads `config.toml` from the usual locations (see `covid-dashboard config`
//! for a template), or the file named by `COVID_DASHBOARD_CONFIG`.
//! `COVID_DASHBOARD_*` environment variables override file values and
//! `RUST_LOG` overrides the configured log level.

use covid_dashboard::api::{serve, AppState};
use covid_dashboard::config::Config;
use covid_dashboard::dashboard::Dashboard;
use covid_dashboard::logging::init_logging;
use covid_dashboard::upstream::{CovidSource, UpstreamClient};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("COVID_DASHBOARD_CONFIG") {
        Ok(path) => Config::load_with_env(&PathBuf::from(path))?,
        Err(_) => Config::load_default(),
    };

    init_logging(&config.logging);

    tracing::info!(
        "Starting COVID-19 dashboard API server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Upstream: {}", config.upstream.base_url);
    tracing::info!(
        "Response cache: {}",
        if config.upstream.cache_enabled { "enabled" } else { "disabled" }
    );

    let client = Arc::new(UpstreamClient::new(config.upstream.client_config())?);
    let source: Arc<dyn CovidSource> = client;
    let dashboard = Arc::new(Dashboard::new(source, config.dashboard.render_options()));

    // Warm-up only; an unreachable upstream is reported, not fatal
    match dashboard.probe().await {
        Ok(()) => tracing::info!("Upstream connection verified"),
        Err(e) => tracing::warn!("Upstream not available: {} (pages will show warnings)", e),
    }

    let state = AppState::new(dashboard);

    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("COVID-19 dashboard API server stopped");
    Ok(())
}
