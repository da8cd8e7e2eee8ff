//! Dashboard pipeline
//!
//! One page load: fetch the global summary, then the country list, then
//! render. Fetch failures never escape; they become warnings on the page and
//! the affected views show "data unavailable".

use std::sync::Arc;
use thiserror::Error;

use crate::upstream::{
    fetch_countries, fetch_global_summary, CountryRecord, CovidSource, Endpoint, FetchError,
};
use crate::view::{
    find_country, navigation_options, render, top_n, DashboardState, RenderOptions, Snapshot,
    ViewOutput,
};

/// Anything that leaves part of the dashboard without data
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Country not found: {0}")]
    CountryNotFound(String),
}

/// Fetch-and-render service shared by the API and the CLI
pub struct Dashboard {
    source: Arc<dyn CovidSource>,
    options: RenderOptions,
}

impl Dashboard {
    pub fn new(source: Arc<dyn CovidSource>, options: RenderOptions) -> Self {
        Self { source, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Base URL the source fetches from
    pub fn upstream_url(&self) -> String {
        let url = self.source.url(Endpoint::GlobalSummary);
        url.strip_suffix(Endpoint::GlobalSummary.path())
            .map(str::to_string)
            .unwrap_or(url)
    }

    /// Fetch both endpoints, in order, collecting failures as warnings
    pub async fn load(&self) -> Snapshot {
        let mut warnings = Vec::new();

        let global = match fetch_global_summary(self.source.as_ref()).await {
            Ok(summary) => Some(summary),
            Err(e) => {
                warnings.push(warning(DashboardError::from(e)));
                None
            }
        };

        let countries = match fetch_countries(self.source.as_ref()).await {
            Ok(records) => {
                tracing::debug!("Loaded {} country records", records.len());
                Some(records)
            }
            Err(e) => {
                warnings.push(warning(DashboardError::from(e)));
                None
            }
        };

        Snapshot {
            global,
            countries,
            warnings,
        }
    }

    /// Load fresh data and render it for `state`
    pub async fn view(&self, state: &DashboardState) -> ViewOutput {
        self.view_with(state, &self.options).await
    }

    /// Same as [`Dashboard::view`] with per-call render options
    pub async fn view_with(&self, state: &DashboardState, options: &RenderOptions) -> ViewOutput {
        let snapshot = self.load().await;
        render(state, &snapshot, options)
    }

    /// Selectable navigation labels
    pub async fn navigation(&self) -> Result<Vec<String>, DashboardError> {
        let records = fetch_countries(self.source.as_ref()).await?;
        Ok(navigation_options(&records))
    }

    /// Highest-case countries
    pub async fn top(&self, n: usize) -> Result<Vec<CountryRecord>, DashboardError> {
        let records = fetch_countries(self.source.as_ref()).await?;
        Ok(top_n(&records, n))
    }

    /// A single country's record
    pub async fn country(&self, name: &str) -> Result<CountryRecord, DashboardError> {
        let records = fetch_countries(self.source.as_ref()).await?;
        find_country(&records, name)
            .cloned()
            .ok_or_else(|| DashboardError::CountryNotFound(name.to_string()))
    }

    /// Whether the global summary endpoint currently answers
    pub async fn probe(&self) -> Result<(), DashboardError> {
        fetch_global_summary(self.source.as_ref()).await?;
        Ok(())
    }

    /// Forget memoized upstream responses
    pub async fn refresh(&self) {
        self.source.clear_cache().await;
    }
}

fn warning(err: DashboardError) -> String {
    tracing::warn!(error = %err, "Dashboard data unavailable");
    err.to_string()
}
