//! Upstream Statistics API
//!
//! Fetches COVID-19 statistics from disease.sh.
//!
//! ## Architecture
//!
//! - **Endpoint**: the two fixed upstream URLs
//! - **UpstreamClient**: single best-effort GET per fetch, JSON passed through
//! - **ResponseCache**: optional memoization keyed by endpoint URL
//! - **Types**: typed decoding of the fields the dashboard shows

mod cache;
mod client;
mod endpoint;
mod error;
mod types;

pub use cache::ResponseCache;
pub use client::{
    fetch_countries, fetch_global_summary, ClientConfig, CovidSource, UpstreamClient,
};
pub use endpoint::{Endpoint, DEFAULT_BASE_URL};
pub use error::{FetchError, FetchResult};
pub use types::{CountryRecord, GlobalSummary};
