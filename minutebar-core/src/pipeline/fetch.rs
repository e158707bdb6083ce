//! Fetch stage: yesterday's intraday bars for one symbol.

use crate::data::{BarInterval, DataError, DataProvider, RawBar};
use crate::domain::{BarTable, TaggedBar};
use chrono::{Days, NaiveDate};
use tracing::{debug, warn};

/// The trading day collected for a run dated `as_of`.
pub fn target_day(as_of: NaiveDate) -> Result<NaiveDate, DataError> {
    as_of
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| DataError::Config(format!("no calendar day before {as_of}")))
}

/// Fetch the bars of `as_of - 1 day` for `symbol`, sorted and tagged.
///
/// The provider is asked for a window padded by a day on each side so that
/// exchange offsets never cut off the edges of the target day; only bars whose
/// exchange-local date equals the target day are kept.
///
/// An unknown symbol yields an empty table. Every other provider failure is
/// returned as-is.
pub fn fetch_day(
    provider: &dyn DataProvider,
    symbol: &str,
    as_of: NaiveDate,
    interval: BarInterval,
) -> Result<BarTable<TaggedBar>, DataError> {
    if symbol.trim().is_empty() {
        return Err(DataError::InvalidSymbol(symbol.to_string()));
    }

    let day = target_day(as_of)?;
    let start = day.checked_sub_days(Days::new(1)).unwrap_or(day);

    debug!(ticker = symbol, provider = provider.name(), %day, interval = interval.as_str(), "fetching bars");

    let fetched = match provider.fetch(symbol, start, as_of, interval) {
        Ok(result) => result,
        Err(DataError::SymbolNotFound { .. }) => {
            warn!(ticker = symbol, "symbol not found at provider, treating as no data");
            return Ok(BarTable::empty(symbol));
        }
        Err(e) => return Err(e),
    };

    let mut bars: Vec<RawBar> = fetched
        .bars
        .into_iter()
        .filter(|b| b.timestamp.date_naive() == day)
        .collect();
    bars.sort_by_key(|b| b.timestamp);

    let rows = bars.into_iter().map(|b| tag(symbol, b)).collect();
    Ok(BarTable::new(symbol, rows))
}

fn tag(symbol: &str, b: RawBar) -> TaggedBar {
    TaggedBar {
        symbol: symbol.to_string(),
        timestamp: b.timestamp,
        open: b.open,
        high: b.high,
        low: b.low,
        close: b.close,
        adj_close: b.adj_close,
        volume: b.volume,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MemoryProvider;
    use chrono::DateTime;

    fn raw(ts: &str, close: f64) -> RawBar {
        RawBar {
            timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 100,
            adj_close: Some(close),
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn keeps_only_previous_day_sorted() {
        let provider = MemoryProvider::new().with_bars(
            "NFLX",
            vec![
                raw("2024-03-04T09:31:00-05:00", 2.0),
                raw("2024-03-05T09:30:00-05:00", 9.0),
                raw("2024-03-04T09:30:00-05:00", 1.0),
                raw("2024-03-03T15:59:00-05:00", 8.0),
            ],
        );

        let table = fetch_day(&provider, "NFLX", as_of(), BarInterval::OneMinute).unwrap();
        let closes: Vec<f64> = table.rows.iter().map(|r| r.close).collect();
        assert_eq!(closes, vec![1.0, 2.0]);
        assert!(table.rows.iter().all(|r| r.symbol == "NFLX"));
    }

    #[test]
    fn unknown_symbol_is_empty_table() {
        let table = fetch_day(&MemoryProvider::new(), "ZZZZ", as_of(), BarInterval::OneMinute)
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.symbol, "ZZZZ");
    }

    #[test]
    fn outage_propagates() {
        let provider = MemoryProvider::new().with_outage("DIS");
        let err = fetch_day(&provider, "DIS", as_of(), BarInterval::OneMinute).unwrap_err();
        assert!(matches!(err, DataError::NetworkUnreachable(_)));
    }

    #[test]
    fn blank_symbol_rejected() {
        let err = fetch_day(&MemoryProvider::new(), " ", as_of(), BarInterval::OneMinute)
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidSymbol(_)));
    }

    #[test]
    fn target_day_crosses_month() {
        let day = target_day(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()).unwrap();
        assert_eq!(day, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(target_day(NaiveDate::MIN).is_err());
    }
}
