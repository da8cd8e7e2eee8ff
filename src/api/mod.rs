//! Dashboard REST API
//!
//! HTTP API layer, built with Axum. Serves the rendered dashboard as JSON
//! for whatever front end draws it.
//!
//! # Endpoints
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Rendered page (`view`, `country`, `top` query params)
//! - `POST /api/v1/cache/clear` - Drop memoized upstream responses
//!
//! ## Countries
//! - `GET /api/v1/countries` - Navigation list
//! - `GET /api/v1/countries/:name` - One country's record
//! - `GET /api/v1/top` - Highest-case countries (`n` query param)
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use covid_dashboard::api::{serve, AppState};
//! use covid_dashboard::config::Config;
//! use covid_dashboard::dashboard::Dashboard;
//! use covid_dashboard::upstream::UpstreamClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let client = UpstreamClient::new(config.upstream.client_config())?;
//!     let dashboard = Dashboard::new(Arc::new(client), config.dashboard.render_options());
//!
//!     let state = AppState::new(Arc::new(dashboard));
//!     serve(state, &config.api).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Dashboard routes
        .route("/dashboard", get(routes::dashboard::get_dashboard))
        .route("/cache/clear", post(routes::dashboard::clear_cache))
        // Country routes
        .route("/countries", get(routes::countries::list_countries))
        .route("/countries/:name", get(routes::countries::get_country))
        .route("/top", get(routes::countries::top_countries));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("COVID-19 dashboard API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("COVID-19 dashboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
