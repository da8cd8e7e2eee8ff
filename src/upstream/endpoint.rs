//! Upstream endpoints

use serde::Serialize;
use std::fmt;

/// Default upstream host
pub const DEFAULT_BASE_URL: &str = "https://disease.sh";

/// The two fixed endpoints the dashboard reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    /// Worldwide totals
    GlobalSummary,
    /// Per-country list
    Countries,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::GlobalSummary => "/v3/covid-19/all",
            Endpoint::Countries => "/v3/covid-19/countries",
        }
    }

    /// Full URL for this endpoint under `base_url`
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::GlobalSummary => write!(f, "global summary"),
            Endpoint::Countries => write!(f, "country list"),
        }
    }
}
