//! # COVID-19 Dashboard
//!
//! Fetches public COVID-19 statistics from the disease.sh REST API and
//! shapes them into metric cards, charts and tables.
//!
//! ## Modules
//!
//! - [`upstream`]: HTTP client for the two statistics endpoints, with an
//!   optional response cache
//! - [`view`]: view selection (global, one country, full table), top-N
//!   ranking and page rendering
//! - [`dashboard`]: the fetch-then-render pipeline for one page load
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use covid_dashboard::dashboard::Dashboard;
//! use covid_dashboard::upstream::{ClientConfig, UpstreamClient};
//! use covid_dashboard::view::{DashboardState, RenderOptions, ViewMode};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = UpstreamClient::new(ClientConfig::default())?;
//!     let dashboard = Dashboard::new(Arc::new(client), RenderOptions::default());
//!
//!     let output = dashboard.view(&DashboardState::new(ViewMode::FullTable)).await;
//!     for warning in &output.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!     println!("{} rows", output.table.map(|t| t.len()).unwrap_or(0));
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod upstream;
pub mod view;

// Re-export top-level types for convenience
pub use upstream::{
    ClientConfig, CountryRecord, CovidSource, Endpoint, FetchError, FetchResult, GlobalSummary,
    ResponseCache, UpstreamClient,
};

pub use view::{
    render, select, top_n, DashboardState, RenderOptions, Snapshot, ViewMode, ViewModel,
    ViewOutput,
};

pub use dashboard::{Dashboard, DashboardError};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, DashboardConfig, LoggingConfig, UpstreamConfig};
