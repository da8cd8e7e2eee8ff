//! View Selector
//!
//! Derives the rows or scalars a display needs from the fetched data.
//! Everything here is a pass-through, a sort, or a filter; no counts are
//! computed.

use serde::Serialize;

use crate::upstream::{CountryRecord, GlobalSummary};

/// Navigation label for the worldwide view
pub const GLOBAL_LABEL: &str = "Global";

/// Navigation label for the full table view
pub const ALL_COUNTRIES_LABEL: &str = "All Countries";

/// Records fed to the bar and pie charts
pub const DEFAULT_TOP_N: usize = 10;

/// What the user has chosen to look at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", content = "country", rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Global,
    SingleCountry(String),
    FullTable,
}

impl ViewMode {
    /// Map a navigation label to a mode
    pub fn from_selection(label: &str) -> Self {
        match label {
            GLOBAL_LABEL => ViewMode::Global,
            ALL_COUNTRIES_LABEL => ViewMode::FullTable,
            name => ViewMode::SingleCountry(name.to_string()),
        }
    }

    /// Navigation label for this mode
    pub fn label(&self) -> &str {
        match self {
            ViewMode::Global => GLOBAL_LABEL,
            ViewMode::SingleCountry(name) => name,
            ViewMode::FullTable => ALL_COUNTRIES_LABEL,
        }
    }
}

/// Minimal data handed to a rendering call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewModel {
    Global { summary: GlobalSummary },
    Country { record: CountryRecord },
    Table { rows: Vec<CountryRecord> },
    /// Nothing to show; `reason` is the user-facing explanation
    Unavailable { reason: String },
}

impl ViewModel {
    pub fn is_available(&self) -> bool {
        !matches!(self, ViewModel::Unavailable { .. })
    }
}

/// Derive the view for `mode`
///
/// `None` inputs mean the fetch failed; the result is then `Unavailable`
/// for any mode that needs that input.
pub fn select(
    mode: &ViewMode,
    global: Option<&GlobalSummary>,
    countries: Option<&[CountryRecord]>,
) -> ViewModel {
    match mode {
        ViewMode::Global => match global {
            Some(summary) => ViewModel::Global {
                summary: summary.clone(),
            },
            None => unavailable("Global statistics are unavailable"),
        },
        ViewMode::SingleCountry(name) => {
            let Some(records) = countries else {
                return unavailable("Country statistics are unavailable");
            };
            match find_country(records, name) {
                Some(record) => ViewModel::Country {
                    record: record.clone(),
                },
                None => {
                    tracing::warn!(country = %name, "Selected country not present in data");
                    unavailable(format!("No data for country '{}'", name))
                }
            }
        }
        ViewMode::FullTable => match countries {
            Some(records) => ViewModel::Table {
                rows: sorted_by_cases(records),
            },
            None => unavailable("Country statistics are unavailable"),
        },
    }
}

fn unavailable(reason: impl Into<String>) -> ViewModel {
    ViewModel::Unavailable {
        reason: reason.into(),
    }
}

/// First record whose name matches exactly (case-sensitive)
pub fn find_country<'a>(records: &'a [CountryRecord], name: &str) -> Option<&'a CountryRecord> {
    records.iter().find(|r| r.country == name)
}

/// All records, highest case count first; ties keep upstream order
pub fn sorted_by_cases(records: &[CountryRecord]) -> Vec<CountryRecord> {
    let mut rows = records.to_vec();
    // sort_by is stable
    rows.sort_by(|a, b| b.cases.cmp(&a.cases));
    rows
}

/// The `n` records with the highest case count
pub fn top_n(records: &[CountryRecord], n: usize) -> Vec<CountryRecord> {
    let mut rows = sorted_by_cases(records);
    rows.truncate(n);
    rows
}

/// `"Global"` and `"All Countries"`, then the sorted distinct country names
///
/// The two fixed entries are always present, so an empty record list still
/// leaves a way back to the global and table views.
pub fn navigation_options(records: &[CountryRecord]) -> Vec<String> {
    let mut names: Vec<&str> = records.iter().map(|r| r.country.as_str()).collect();
    names.sort_unstable();
    names.dedup();

    [GLOBAL_LABEL, ALL_COUNTRIES_LABEL]
        .into_iter()
        .chain(names)
        .map(str::to_string)
        .collect()
}
