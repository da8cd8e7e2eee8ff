//! COVID-19 Dashboard CLI
//!
//! Runs the dashboard pipeline once and prints the result:
//! - Global totals
//! - One country's totals
//! - The full table, ranked by cases
//! - The top-N chart
//! - The navigation list

use clap::{Parser, Subcommand};
use covid_dashboard::config::{generate_default_config, Config, LoggingConfig};
use covid_dashboard::dashboard::Dashboard;
use covid_dashboard::logging::init_logging;
use covid_dashboard::upstream::UpstreamClient;
use covid_dashboard::view::{
    group_thousands, Chart, ChartKind, DashboardState, ViewMode, ViewOutput,
};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "covid-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "COVID-19 statistics dashboard for the terminal")]
#[command(long_about = "Fetches COVID-19 statistics from disease.sh and prints metric cards, charts and tables.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json, csv)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Countries shown in the charts (default: from config)
    #[arg(long, global = true)]
    pub top: Option<usize>,

    /// Upstream API base URL (default: from config)
    #[arg(long, global = true)]
    pub upstream_url: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show worldwide totals
    Global,

    /// Show one country's totals
    Country {
        /// Country name, exact and case-sensitive (e.g. "USA")
        name: String,
    },

    /// Show every country, ranked by cases
    Table,

    /// Show the most affected countries
    Top {
        /// Number of countries
        #[arg(short)]
        n: Option<usize>,
    },

    /// List selectable countries
    Countries,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&logging_config(&config, cli.verbose));
    if let Some(url) = &cli.upstream_url {
        config.upstream.base_url = url.clone();
    }
    if let Some(n) = cli.top {
        config.dashboard.top_n = n;
    }

    // CLI runs once per process; nothing to memoize
    config.upstream.cache_enabled = false;

    let build_dashboard = || -> anyhow::Result<Dashboard> {
        let client = UpstreamClient::new(config.upstream.client_config())?;
        Ok(Dashboard::new(
            Arc::new(client),
            config.dashboard.render_options(),
        ))
    };

    match cli.command {
        Commands::Global => {
            let output = build_dashboard()?.view(&DashboardState::default()).await;
            print_output(&output, &cli.format)?;
        }

        Commands::Country { name } => {
            let state = DashboardState::new(ViewMode::SingleCountry(name));
            let output = build_dashboard()?.view(&state).await;
            print_output(&output, &cli.format)?;
        }

        Commands::Table => {
            let state = DashboardState::new(ViewMode::FullTable);
            let output = build_dashboard()?.view(&state).await;
            print_output(&output, &cli.format)?;
        }

        Commands::Top { n } => {
            let n = n.unwrap_or(config.dashboard.top_n);

            match build_dashboard()?.top(n).await {
                Ok(top) => {
                    match cli.format.as_str() {
                        "json" => println!("{}", serde_json::to_string_pretty(&top)?),
                        "csv" => {
                            let mut writer = csv::Writer::from_writer(std::io::stdout());
                            for record in &top {
                                writer.serialize(record)?;
                            }
                            writer.flush()?;
                        }
                        _ => print_bars(
                            &format!("Top {} Most Affected Countries", n),
                            top.iter().map(|r| (r.country.as_str(), r.cases)),
                        ),
                    }
                }
                Err(e) => {
                    eprintln!("warning: {}", e);
                    println!("Country data unavailable");
                }
            }
        }

        Commands::Countries => match build_dashboard()?.navigation().await {
            Ok(names) => match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&names)?),
                _ => {
                    for name in names {
                        println!("{}", name);
                    }
                }
            },
            Err(e) => {
                eprintln!("warning: {}", e);
                println!("Country data unavailable");
            }
        },

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Configured logging, raised to debug by `--verbose`
fn logging_config(config: &Config, verbose: bool) -> LoggingConfig {
    let mut logging = config.logging.clone();
    if verbose {
        logging.level = "debug".to_string();
    }
    logging
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

fn print_output(output: &ViewOutput, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(output)?);
            return Ok(());
        }
        "csv" => {
            print_warnings(&output.warnings);
            return print_csv(output);
        }
        _ => {}
    }

    print_warnings(&output.warnings);

    println!("{}", output.title);
    if let Some(updated) = &output.last_updated {
        println!("Last updated: {}", updated);
    }
    println!();

    if output.metrics.is_empty() && output.table.is_none() {
        println!("Data unavailable");
    }

    for metric in &output.metrics {
        println!("{:<18} {:>15}", metric.label, metric.value);
    }

    if let Some(rows) = &output.table {
        println!(
            "{:>4}  {:<32} {:>15} {:>12} {:>15}",
            "#", "Country", "Cases", "Deaths", "Recovered"
        );
        println!("{}", "-".repeat(82));
        for row in rows {
            println!(
                "{:>4}  {:<32} {:>15} {:>12} {:>15}",
                row.rank, row.country, row.cases, row.deaths, row.recovered
            );
        }
    }

    if let Some(chart) = output.charts.iter().find(|c| c.kind == ChartKind::Bar) {
        println!();
        print_bar_chart(chart);
    }

    Ok(())
}

fn print_csv(output: &ViewOutput) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());

    match &output.table {
        Some(rows) => {
            writer.write_record(["rank", "country", "cases", "deaths", "recovered"])?;
            for row in rows {
                writer.write_record([
                    row.rank.to_string(),
                    row.country.clone(),
                    row.cases.replace(',', ""),
                    row.deaths.replace(',', ""),
                    row.recovered.replace(',', ""),
                ])?;
            }
        }
        None => {
            writer.write_record(["metric", "value"])?;
            for metric in &output.metrics {
                writer.write_record([metric.label.clone(), metric.raw.to_string()])?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

const BAR_WIDTH: u64 = 40;

fn print_bar_chart(chart: &Chart) {
    if let Some(series) = chart.series.first() {
        print_bars(
            &chart.title,
            series.points.iter().map(|p| (p.label.as_str(), p.value)),
        );
    }
}

fn print_bars<'a>(title: &str, points: impl Iterator<Item = (&'a str, u64)>) {
    let points: Vec<(&str, u64)> = points.collect();
    let max = points.iter().map(|(_, v)| *v).max().unwrap_or(0).max(1);

    println!("{}", title);

    let mut stdout = std::io::stdout().lock();
    for (label, value) in points {
        let width = (value.saturating_mul(BAR_WIDTH) / max) as usize;
        let _ = writeln!(
            stdout,
            "{:<24} {:<40} {}",
            label,
            "#".repeat(width),
            group_thousands(value)
        );
    }
}
