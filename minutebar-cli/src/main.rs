//! minutebar CLI — collect yesterday's intraday bars and inspect output files.
//!
//! Commands:
//! - `collect` — fetch, enrich and write the previous day's bars from Yahoo Finance
//! - `inspect` — summarize a written CSV or Parquet file per ticker

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use minutebar_core::data::YahooProvider;
use minutebar_core::domain::EnrichedBar;
use minutebar_core::output::{read_output, OutputFormat};
use minutebar_core::{run_pipeline, CollectorConfig, RunSummary};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "minutebar",
    about = "minutebar — daily one-minute bar collector with rolling VWAP"
)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect the previous day's bars and write one dated file.
    Collect {
        /// Symbols to collect (e.g., NFLX DIS). Defaults to the configured list.
        symbols: Vec<String>,

        /// Reference date (YYYY-MM-DD); the day before it is collected. Defaults to today.
        #[arg(long)]
        as_of: Option<String>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory. Overrides the config file.
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Output format: csv or parquet. Overrides the config file.
        #[arg(long)]
        format: Option<OutputFormat>,
    },
    /// Print per-ticker statistics for a written output file.
    Inspect {
        /// CSV or Parquet file produced by `collect`.
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Collect {
            symbols,
            as_of,
            config,
            output_dir,
            format,
        } => run_collect(symbols, as_of, config, output_dir, format),
        Commands::Inspect { file } => run_inspect(&file),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run_collect(
    symbols: Vec<String>,
    as_of: Option<String>,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => CollectorConfig::from_file(&path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CollectorConfig::default(),
    };

    if !symbols.is_empty() {
        config.symbols = symbols;
    }
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    if let Some(format) = format {
        config.format = format;
    }
    config.validate().context("invalid configuration")?;
    tracing::debug!(?config, "effective configuration");

    let as_of = as_of
        .as_deref()
        .map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .transpose()
        .context("--as-of must be YYYY-MM-DD")?
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    let provider = YahooProvider::new(config.timeout()).context("building HTTP client")?;
    let summary = run_pipeline(&provider, &config, as_of)
        .with_context(|| format!("collecting bars as of {as_of}"))?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!();
    println!("=== Collection Summary ===");
    for (symbol, rows) in &summary.rows_by_symbol {
        println!("{symbol:<8} {rows:>6} rows");
    }
    println!("{:<8} {:>6} rows", "total", summary.total_rows());
    match &summary.path {
        Some(path) => println!("Written to: {}", path.display()),
        None => println!("No data collected; nothing written."),
    }
}

fn run_inspect(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("file does not exist: {}", path.display());
    }
    let rows = read_output(path).with_context(|| format!("reading {}", path.display()))?;

    println!("File: {}", path.display());
    println!("Rows: {}", rows.len());
    if rows.is_empty() {
        return Ok(());
    }

    let mut by_ticker: BTreeMap<&str, Vec<&EnrichedBar>> = BTreeMap::new();
    for row in &rows {
        by_ticker.entry(row.symbol()).or_default().push(row);
    }

    println!();
    println!(
        "{:<8} {:>6}  {:<25}  {:<25}  {:>12}  {:>16}",
        "Ticker", "Rows", "First", "Last", "Last VWAP", "DollarValue"
    );
    for (ticker, bars) in &by_ticker {
        let (Some(first), Some(last)) = (bars.first(), bars.last()) else {
            continue;
        };
        println!(
            "{:<8} {:>6}  {:<25}  {:<25}  {:>12.4}  {:>16.2}",
            ticker,
            bars.len(),
            first.timestamp().to_string(),
            last.timestamp().to_string(),
            last.vwap,
            last.dollar_value
        );
    }

    Ok(())
}
