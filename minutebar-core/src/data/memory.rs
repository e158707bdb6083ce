//! In-memory data provider.
//!
//! Serves pre-loaded bars keyed by symbol. Used for offline replays and as
//! the test double for the pipeline.

use super::provider::{BarInterval, DataError, DataProvider, DataSource, FetchResult, RawBar};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone)]
pub struct MemoryProvider {
    bars: HashMap<String, Vec<RawBar>>,
    unreachable: HashSet<String>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the bars served for `symbol`.
    pub fn with_bars(mut self, symbol: impl Into<String>, bars: Vec<RawBar>) -> Self {
        self.bars.insert(symbol.into(), bars);
        self
    }

    /// Make every fetch for `symbol` fail as if the network were down.
    pub fn with_outage(mut self, symbol: impl Into<String>) -> Self {
        self.unreachable.insert(symbol.into());
        self
    }
}

impl DataProvider for MemoryProvider {
    fn name(&self) -> &str {
        "memory"
    }

    /// Returns the registered bars whose exchange-local date falls in `start..=end`.
    ///
    /// The interval is not resampled; bars are served as registered.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        _interval: BarInterval,
    ) -> Result<FetchResult, DataError> {
        if self.unreachable.contains(symbol) {
            return Err(DataError::NetworkUnreachable(format!(
                "memory provider outage for {symbol}"
            )));
        }

        let registered = self
            .bars
            .get(symbol)
            .ok_or_else(|| DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            })?;

        let bars = registered
            .iter()
            .filter(|b| {
                let date = b.timestamp.date_naive();
                date >= start && date <= end
            })
            .cloned()
            .collect();

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::Memory,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn raw(ts: &str) -> RawBar {
        RawBar {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 1,
            adj_close: None,
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn filters_by_local_date_range() {
        let p = MemoryProvider::new().with_bars(
            "DIS",
            vec![
                raw("2024-03-01T15:59:00-05:00"),
                raw("2024-03-04T09:30:00-05:00"),
                raw("2024-03-05T09:30:00-05:00"),
            ],
        );
        let r = p
            .fetch("DIS", d(2024, 3, 2), d(2024, 3, 4), BarInterval::OneMinute)
            .unwrap();
        assert_eq!(r.bars.len(), 1);
        assert_eq!(r.source, DataSource::Memory);
    }

    #[test]
    fn unknown_symbol_is_not_found() {
        let p = MemoryProvider::new();
        let r = p.fetch("NOPE", d(2024, 3, 1), d(2024, 3, 2), BarInterval::OneMinute);
        assert!(matches!(r, Err(DataError::SymbolNotFound { .. })));
    }

    #[test]
    fn outage_fails_fetch() {
        let p = MemoryProvider::new()
            .with_bars("DIS", vec![])
            .with_outage("DIS");
        let r = p.fetch("DIS", d(2024, 3, 1), d(2024, 3, 2), BarInterval::OneMinute);
        assert!(matches!(r, Err(DataError::NetworkUnreachable(_))));
    }
}
