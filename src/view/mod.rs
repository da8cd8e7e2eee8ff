//! Views
//!
//! Shapes fetched statistics into what a page displays.
//!
//! - [`select`]: mode-specific view model (global, one country, full table)
//! - [`top_n`]: highest-case countries for the charts
//! - [`render`]: full page description for the current selection

mod format;
mod render;
mod selector;

pub use format::{format_updated, group_thousands};
pub use render::{
    render, Chart, ChartKind, ChartPoint, ChartSeries, DashboardState, MetricCard, RenderOptions,
    Snapshot, TableRow, ViewOutput,
};
pub use selector::{
    find_country, navigation_options, select, sorted_by_cases, top_n, ViewMode, ViewModel,
    ALL_COUNTRIES_LABEL, DEFAULT_TOP_N, GLOBAL_LABEL,
};
