//! Bar — the fundamental market data unit.
//!
//! A row moves through three shapes on its way to disk:
//! - [`TaggedBar`]: as fetched, tagged with its ticker, still carrying `Adj Close`
//! - [`Bar`]: cleaned, `Adj Close` dropped
//! - [`EnrichedBar`]: a `Bar` plus the rolling VWAP and cumulative dollar value

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// Fetched intraday bar for a single symbol and minute.
///
/// Timestamps are exchange-local with their UTC offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedBar {
    pub symbol: String,
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    /// Not every source reports an adjusted close for intraday bars.
    pub adj_close: Option<f64>,
    pub volume: u64,
}

/// Cleaned OHLCV bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: DateTime<FixedOffset>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// (High + Low + Close) / 3.
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    /// Close × Volume for this bar.
    pub fn traded_value(&self) -> f64 {
        self.close * self.volume as f64
    }

    /// Calendar date of the bar in exchange-local time.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.date_naive()
    }
}

impl From<TaggedBar> for Bar {
    fn from(b: TaggedBar) -> Self {
        Self {
            symbol: b.symbol,
            timestamp: b.timestamp,
            open: b.open,
            high: b.high,
            low: b.low,
            close: b.close,
            volume: b.volume,
        }
    }
}

/// A cleaned bar with its enrichment columns.
///
/// `vwap` is NaN or infinite when the trailing window traded no volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedBar {
    #[serde(flatten)]
    pub bar: Bar,
    pub vwap: f64,
    pub dollar_value: f64,
}

impl EnrichedBar {
    pub fn symbol(&self) -> &str {
        &self.bar.symbol
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.bar.timestamp
    }
}
