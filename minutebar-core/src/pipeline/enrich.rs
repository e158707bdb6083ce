//! Enrichment stage: rolling VWAP and cumulative dollar value.

use crate::domain::{Bar, BarTable, EnrichedBar};
use crate::indicators::{DollarValue, Indicator, Vwap};
use chrono::Duration;
use tracing::debug;

/// Attach `VWAP` over a trailing `window` and the running `DollarValue`.
///
/// Rows must already be in ascending timestamp order.
pub fn enrich(table: BarTable<Bar>, window: Duration) -> BarTable<EnrichedBar> {
    let vwap = Vwap::new(window);
    let vwaps = vwap.compute(&table.rows);
    let dollar_values = DollarValue.compute(&table.rows);

    debug!(ticker = %table.symbol, rows = table.len(), indicator = vwap.name(), "enriched");

    let BarTable { symbol, rows } = table;
    let rows = rows
        .into_iter()
        .zip(vwaps)
        .zip(dollar_values)
        .map(|((bar, vwap), dollar_value)| EnrichedBar {
            bar,
            vwap,
            dollar_value,
        })
        .collect();

    BarTable::new(symbol, rows)
}
