//! Intraday indicators.
//!
//! Indicators are pure functions: bar history in, numeric series out. Each
//! series has the same length as the input bars, one value per bar.
//!
//! Time-windowed aggregates are timestamp-based (a trailing wall-clock span),
//! not a fixed bar count, so missing minutes shrink the window rather than
//! stretching it.

pub mod dollar_value;
pub mod rolling;
pub mod vwap;

pub use dollar_value::DollarValue;
pub use rolling::rolling_time_sum;
pub use vwap::Vwap;

use crate::domain::Bar;

/// Trait for indicators.
///
/// No indicator value at bar t may depend on bars after t.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "vwap_15m").
    fn name(&self) -> &str;

    /// Compute the indicator for the entire bar series.
    ///
    /// Bars must be in ascending timestamp order. Returns a `Vec<f64>` of the
    /// same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Create one-minute bars from close prices for testing.
///
/// High/low straddle the close by 0.05 so the typical price equals the close.
/// Bars start 2024-03-04 09:30 New York time.
#[cfg(test)]
pub fn make_minute_bars(closes: &[f64], volume: u64) -> Vec<Bar> {
    let start = chrono::DateTime::parse_from_rfc3339("2024-03-04T09:30:00-05:00").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            symbol: "TEST".to_string(),
            timestamp: start + chrono::Duration::minutes(i as i64),
            open: close,
            high: close + 0.05,
            low: close - 0.05,
            close,
            volume,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-9;
