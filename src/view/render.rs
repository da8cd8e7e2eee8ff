//! Dashboard rendering
//!
//! `render` turns the current selection plus one fetched snapshot into a
//! [`ViewOutput`]: a serializable description of the cards, charts and table
//! to draw. It is pure; drawing is left to whoever consumes the output.

use serde::Serialize;

use super::format::{format_updated, group_thousands};
use super::selector::{
    navigation_options, select, top_n, ViewMode, ViewModel, ALL_COUNTRIES_LABEL, DEFAULT_TOP_N,
};
use crate::upstream::{CountryRecord, GlobalSummary};

/// Transient UI selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub mode: ViewMode,
}

impl DashboardState {
    pub fn new(mode: ViewMode) -> Self {
        Self { mode }
    }
}

/// Data fetched for one page load
///
/// `None` marks a failed fetch; the matching message is in `warnings`.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub global: Option<GlobalSummary>,
    pub countries: Option<Vec<CountryRecord>>,
    pub warnings: Vec<String>,
}

/// Render tuning
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Countries shown in the bar charts
    pub top_n: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

/// A single headline number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: String,
    /// Comma-grouped display value
    pub value: String,
    pub raw: u64,
}

impl MetricCard {
    fn new(label: &str, raw: u64) -> Self {
        Self {
            label: label.to_string(),
            value: group_thousands(raw),
            raw,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Bars grouped per label, one bar per series
    GroupedBar,
    /// Horizontal bars, single series
    Bar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: u64,
    /// Per-slice color; bar points take their series color
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub series: Vec<ChartSeries>,
}

/// One table row, numbers pre-formatted for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub rank: usize,
    pub country: String,
    pub cases: String,
    pub deaths: String,
    pub recovered: String,
}

/// Everything a page needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct ViewOutput {
    pub title: String,
    /// Label of the current selection
    pub selected: String,
    pub navigation: Vec<String>,
    pub metrics: Vec<MetricCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<Vec<TableRow>>,
    pub charts: Vec<Chart>,
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    pub view: ViewModel,
}

const CASES_COLOR: &str = "blue";
const DEATHS_COLOR: &str = "red";
const RECOVERED_COLOR: &str = "green";

/// Build the page for `state` from `snapshot`
pub fn render(state: &DashboardState, snapshot: &Snapshot, options: &RenderOptions) -> ViewOutput {
    let countries = snapshot.countries.as_deref();
    let view = select(&state.mode, snapshot.global.as_ref(), countries);

    let mut warnings = snapshot.warnings.clone();
    if let ViewModel::Unavailable { reason } = &view {
        warnings.push(format!("{}: data unavailable", reason));
    }

    let (title, metrics, table) = match &view {
        ViewModel::Global { summary } => (
            "Global COVID-19 Statistics".to_string(),
            metric_cards(summary.cases, summary.deaths, summary.recovered),
            None,
        ),
        ViewModel::Country { record } => (
            format!("{} COVID-19 Statistics", record.country),
            metric_cards(record.cases, record.deaths, record.recovered),
            None,
        ),
        ViewModel::Table { rows } => (
            format!("{} COVID-19 Statistics", ALL_COUNTRIES_LABEL),
            Vec::new(),
            Some(table_rows(rows)),
        ),
        ViewModel::Unavailable { .. } => (
            format!("{} COVID-19 Statistics", state.mode.label()),
            Vec::new(),
            None,
        ),
    };

    let mut charts = Vec::new();
    if let Some(records) = countries {
        let top = top_n(records, options.top_n);
        charts.push(comparison_chart(&top));
        if let Some(summary) = &snapshot.global {
            charts.push(distribution_chart(summary));
        }
        charts.push(top_cases_chart(&top, options.top_n));
    } else if let Some(summary) = &snapshot.global {
        charts.push(distribution_chart(summary));
    }

    let mut navigation = navigation_options(countries.unwrap_or_default());
    if let ViewMode::SingleCountry(name) = &state.mode {
        // Keep the current selection listed when the country list is missing
        if !navigation.contains(name) {
            navigation.push(name.clone());
        }
    }

    ViewOutput {
        title,
        selected: state.mode.label().to_string(),
        navigation,
        metrics,
        table,
        charts,
        warnings,
        last_updated: snapshot
            .global
            .as_ref()
            .and_then(|g| g.updated)
            .and_then(format_updated),
        view,
    }
}

fn metric_cards(cases: u64, deaths: u64, recovered: u64) -> Vec<MetricCard> {
    vec![
        MetricCard::new("Total Cases", cases),
        MetricCard::new("Total Deaths", deaths),
        MetricCard::new("Total Recovered", recovered),
    ]
}

fn table_rows(rows: &[CountryRecord]) -> Vec<TableRow> {
    rows.iter()
        .enumerate()
        .map(|(i, r)| TableRow {
            rank: i + 1,
            country: r.country.clone(),
            cases: group_thousands(r.cases),
            deaths: group_thousands(r.deaths),
            recovered: group_thousands(r.recovered),
        })
        .collect()
}

fn series<F>(name: &str, color: &str, records: &[CountryRecord], value: F) -> ChartSeries
where
    F: Fn(&CountryRecord) -> u64,
{
    ChartSeries {
        name: name.to_string(),
        color: Some(color.to_string()),
        points: records
            .iter()
            .map(|r| ChartPoint {
                label: r.country.clone(),
                value: value(r),
                color: None,
            })
            .collect(),
    }
}

fn comparison_chart(top: &[CountryRecord]) -> Chart {
    Chart {
        kind: ChartKind::GroupedBar,
        title: "COVID-19 Cases by Country".to_string(),
        series: vec![
            series("cases", CASES_COLOR, top, |r| r.cases),
            series("deaths", DEATHS_COLOR, top, |r| r.deaths),
            series("recovered", RECOVERED_COLOR, top, |r| r.recovered),
        ],
    }
}

fn distribution_chart(summary: &GlobalSummary) -> Chart {
    let slice = |label: &str, value: u64, color: &str| ChartPoint {
        label: label.to_string(),
        value,
        color: Some(color.to_string()),
    };

    Chart {
        kind: ChartKind::Pie,
        title: "Global COVID-19 Cases Distribution".to_string(),
        series: vec![ChartSeries {
            name: "global".to_string(),
            color: None,
            points: vec![
                slice("Cases", summary.cases, CASES_COLOR),
                slice("Deaths", summary.deaths, DEATHS_COLOR),
                slice("Recovered", summary.recovered, RECOVERED_COLOR),
            ],
        }],
    }
}

fn top_cases_chart(top: &[CountryRecord], n: usize) -> Chart {
    Chart {
        kind: ChartKind::Bar,
        title: format!("Top {} Most Affected Countries", n),
        series: vec![series("cases", CASES_COLOR, top, |r| r.cases)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Snapshot {
        Snapshot {
            global: Some(GlobalSummary::new(100, 10, 80)),
            countries: Some(vec![
                CountryRecord::new("A", 5, 1, 4),
                CountryRecord::new("B", 50, 2, 40),
            ]),
            warnings: Vec::new(),
        }
    }

    fn values(output: &ViewOutput) -> Vec<&str> {
        output.metrics.iter().map(|m| m.value.as_str()).collect()
    }

    #[test]
    fn test_global_metrics_read_exactly() {
        let output = render(&DashboardState::default(), &snapshot(), &RenderOptions::default());

        assert_eq!(output.title, "Global COVID-19 Statistics");
        assert_eq!(values(&output), vec!["100", "10", "80"]);
        assert!(output.warnings.is_empty());
        assert!(output.table.is_none());
    }

    #[test]
    fn test_large_metrics_comma_grouped() {
        let mut snap = snapshot();
        snap.global = Some(GlobalSummary::new(1_000_000, 25_000, 999_999));

        let output = render(&DashboardState::default(), &snap, &RenderOptions::default());
        assert_eq!(values(&output), vec!["1,000,000", "25,000", "999,999"]);
        assert_eq!(output.metrics[0].raw, 1_000_000);
    }

    #[test]
    fn test_country_view() {
        let state = DashboardState::new(ViewMode::SingleCountry("B".to_string()));
        let output = render(&state, &snapshot(), &RenderOptions::default());

        assert_eq!(output.title, "B COVID-19 Statistics");
        assert_eq!(output.selected, "B");
        assert_eq!(values(&output), vec!["50", "2", "40"]);
    }

    #[test]
    fn test_missing_country_renders_warning() {
        let state = DashboardState::new(ViewMode::SingleCountry("Z".to_string()));
        let output = render(&state, &snapshot(), &RenderOptions::default());

        assert!(output.metrics.is_empty());
        assert_eq!(
            output.warnings,
            vec!["No data for country 'Z': data unavailable".to_string()]
        );
        // Charts still render from the data that did arrive
        assert_eq!(output.charts.len(), 3);
    }

    #[test]
    fn test_table_view_ranked() {
        let state = DashboardState::new(ViewMode::FullTable);
        let output = render(&state, &snapshot(), &RenderOptions::default());

        let table = output.table.unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!((table[0].rank, table[0].country.as_str()), (1, "B"));
        assert_eq!((table[1].rank, table[1].country.as_str()), (2, "A"));
    }

    #[test]
    fn test_charts_use_top_n() {
        let options = RenderOptions { top_n: 1 };
        let output = render(&DashboardState::default(), &snapshot(), &options);

        let kinds: Vec<ChartKind> = output.charts.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ChartKind::GroupedBar, ChartKind::Pie, ChartKind::Bar]);

        let top = &output.charts[2];
        assert_eq!(top.title, "Top 1 Most Affected Countries");
        assert_eq!(
            top.series[0].points,
            vec![ChartPoint {
                label: "B".to_string(),
                value: 50,
                color: None,
            }]
        );

        let grouped = &output.charts[0];
        assert_eq!(grouped.series.len(), 3);
        assert_eq!(grouped.series[2].points[0].value, 40);

        let pie: Vec<u64> = output.charts[1].series[0].points.iter().map(|p| p.value).collect();
        assert_eq!(pie, vec![100, 10, 80]);
    }

    #[test]
    fn test_pie_slices_carry_their_own_color() {
        let output = render(&DashboardState::default(), &snapshot(), &RenderOptions::default());
        let pie = &output.charts[1].series[0];

        assert_eq!(pie.color, None);
        let colors: Vec<Option<&str>> = pie.points.iter().map(|p| p.color.as_deref()).collect();
        assert_eq!(colors, vec![Some("blue"), Some("red"), Some("green")]);
        assert_eq!(output.charts[0].series[1].color.as_deref(), Some("red"));
    }

    #[test]
    fn test_navigation_lists_views_and_countries() {
        let output = render(&DashboardState::default(), &snapshot(), &RenderOptions::default());
        assert_eq!(output.navigation, vec!["Global", "All Countries", "A", "B"]);
    }

    #[test]
    fn test_navigation_survives_failed_country_fetch() {
        let snap = Snapshot {
            countries: None,
            ..snapshot()
        };
        let state = DashboardState::new(ViewMode::SingleCountry("Peru".to_string()));
        let output = render(&state, &snap, &RenderOptions::default());

        assert_eq!(output.navigation, vec!["Global", "All Countries", "Peru"]);
        assert_eq!(output.selected, "Peru");

        let output = render(&DashboardState::default(), &snap, &RenderOptions::default());
        assert_eq!(output.navigation, vec!["Global", "All Countries"]);
    }

    #[test]
    fn test_failed_fetches_render_unavailable() {
        let snap = Snapshot {
            global: None,
            countries: None,
            warnings: vec!["Upstream returned HTTP 500 for http://x/all".to_string()],
        };
        let output = render(&DashboardState::default(), &snap, &RenderOptions::default());

        assert!(output.metrics.is_empty());
        assert!(output.charts.is_empty());
        assert!(!output.view.is_available());
        assert_eq!(output.warnings.len(), 2);
        assert!(output.warnings[1].ends_with("data unavailable"));
    }

    #[test]
    fn test_last_updated() {
        let mut snap = snapshot();
        if let Some(global) = snap.global.as_mut() {
            global.updated = Some(1_700_000_000_000);
        }
        let output = render(&DashboardState::default(), &snap, &RenderOptions::default());
        assert_eq!(output.last_updated.as_deref(), Some("2023-11-14 22:13 UTC"));
    }
}
