//! Upstream record types
//!
//! Typed views over the disease.sh payloads. Only the fields the dashboard
//! displays are decoded; everything else in the payload is ignored.

use serde::{Deserialize, Serialize};

/// Worldwide totals from the global summary endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalSummary {
    pub cases: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub recovered: u64,
    /// Upstream refresh time, milliseconds since the Unix epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_countries: Option<u64>,
}

impl GlobalSummary {
    pub fn new(cases: u64, deaths: u64, recovered: u64) -> Self {
        Self {
            cases,
            deaths,
            recovered,
            updated: None,
            affected_countries: None,
        }
    }
}

/// One row of the per-country list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryRecord {
    pub country: String,
    pub cases: u64,
    #[serde(default)]
    pub deaths: u64,
    #[serde(default)]
    pub recovered: u64,
}

impl CountryRecord {
    pub fn new(country: impl Into<String>, cases: u64, deaths: u64, recovered: u64) -> Self {
        Self {
            country: country.into(),
            cases,
            deaths,
            recovered,
        }
    }
}
