//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.

use serde::{Deserialize, Serialize};

use crate::upstream::CountryRecord;
use crate::view::ViewMode;

use super::error::ApiError;

// ============================================
// DASHBOARD DTOs
// ============================================

/// Query string for `GET /api/v1/dashboard`
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// global (default), country, or table
    #[serde(default)]
    pub view: Option<String>,
    /// Country name, required when `view=country`
    #[serde(default)]
    pub country: Option<String>,
    /// Override for the number of countries in the charts
    #[serde(default)]
    pub top: Option<usize>,
}

impl DashboardQuery {
    /// Resolve the requested view mode
    pub fn mode(&self) -> Result<ViewMode, ApiError> {
        match self.view.as_deref().unwrap_or("global") {
            "global" => Ok(ViewMode::Global),
            "table" => Ok(ViewMode::FullTable),
            "country" => match self.country.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => Ok(ViewMode::SingleCountry(name.to_string())),
                _ => Err(ApiError::Validation(
                    "view=country requires a 'country' parameter".to_string(),
                )),
            },
            other => Err(ApiError::Validation(format!(
                "Unknown view '{}'. Use: global, country, table",
                other
            ))),
        }
    }
}

// ============================================
// COUNTRY DTOs
// ============================================

/// Navigation list response
#[derive(Debug, Serialize)]
pub struct CountryListResponse {
    pub countries: Vec<String>,
    pub total: usize,
}

/// Query string for `GET /api/v1/top`
#[derive(Debug, Deserialize)]
pub struct TopQuery {
    #[serde(default)]
    pub n: Option<usize>,
}

/// Top-N response
#[derive(Debug, Serialize)]
pub struct TopResponse {
    pub countries: Vec<CountryRecord>,
    pub total: usize,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// healthy or degraded
    pub status: String,
    /// ok or error
    pub upstream: String,
    /// Base URL of the statistics API in use
    pub upstream_url: String,
    pub uptime_seconds: u64,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(view: Option<&str>, country: Option<&str>) -> DashboardQuery {
        DashboardQuery {
            view: view.map(str::to_string),
            country: country.map(str::to_string),
            top: None,
        }
    }

    #[test]
    fn test_mode_resolution() {
        assert_eq!(query(None, None).mode().unwrap(), ViewMode::Global);
        assert_eq!(query(Some("table"), None).mode().unwrap(), ViewMode::FullTable);
        assert_eq!(
            query(Some("country"), Some("India")).mode().unwrap(),
            ViewMode::SingleCountry("India".to_string())
        );
    }

    #[test]
    fn test_mode_validation() {
        assert!(matches!(
            query(Some("country"), None).mode(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            query(Some("country"), Some("  ")).mode(),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            query(Some("history"), None).mode(),
            Err(ApiError::Validation(_))
        ));
    }
}
