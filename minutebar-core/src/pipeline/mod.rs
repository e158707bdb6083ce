//! Daily collection pipeline.
//!
//! Per symbol: fetch → validate → clean → enrich. The run then merges every
//! symbol's table and writes one dated file. Symbols run one after another
//! and the first error aborts the run.

pub mod clean;
pub mod enrich;
pub mod fetch;
pub mod validate;

pub use clean::clean;
pub use enrich::enrich;
pub use fetch::{fetch_day, target_day};
pub use validate::{check, validate, Validity};

use crate::config::CollectorConfig;
use crate::data::{BarInterval, DataError, DataProvider};
use crate::domain::{BarTable, EnrichedBar, SymbolProvider};
use crate::output;
use chrono::{Duration, NaiveDate};
use std::path::PathBuf;
use tracing::info;

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Written file, or `None` when no symbol had data.
    pub path: Option<PathBuf>,
    /// Enriched row count per symbol, in run order.
    pub rows_by_symbol: Vec<(String, usize)>,
}

impl RunSummary {
    pub fn total_rows(&self) -> usize {
        self.rows_by_symbol.iter().map(|(_, n)| n).sum()
    }
}

/// Run the per-symbol stages for one tracked instrument.
pub fn collect_symbol(
    provider: &dyn DataProvider,
    symbol: &dyn SymbolProvider,
    as_of: NaiveDate,
    interval: BarInterval,
    window: Duration,
) -> Result<BarTable<EnrichedBar>, DataError> {
    let fetched = fetch_day(provider, symbol.symbol(), as_of, interval)?;
    let validated = validate(fetched);
    let cleaned = clean(validated);
    Ok(enrich(cleaned, window))
}

/// Collect every configured symbol for the day before `as_of` and write the result.
pub fn run_pipeline(
    provider: &dyn DataProvider,
    config: &CollectorConfig,
    as_of: NaiveDate,
) -> Result<RunSummary, DataError> {
    config.validate()?;

    info!(
        provider = provider.name(),
        %as_of,
        symbols = config.symbols.len(),
        "starting collection"
    );

    let window = config.window();
    let mut tables = Vec::with_capacity(config.symbols.len());
    for symbol in config.symbol_providers() {
        tables.push(collect_symbol(provider, &symbol, as_of, config.interval, window)?);
    }

    let rows_by_symbol = tables.iter().map(|t| (t.symbol.clone(), t.len())).collect();
    let path = output::write_combined(tables, &config.output_dir, config.format)?;

    Ok(RunSummary {
        path,
        rows_by_symbol,
    })
}
