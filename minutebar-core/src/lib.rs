//! minutebar core — daily intraday bar collection.
//!
//! This crate fetches the previous trading day's one-minute bars for a set of
//! tickers, enriches them and writes one dated file:
//! - Domain types (bars, per-symbol tables, symbol providers)
//! - Market-data providers (Yahoo Finance, in-memory)
//! - Time-windowed indicators (rolling VWAP, cumulative dollar value)
//! - Pipeline stages: fetch → validate → clean → enrich, then write
//! - CSV and Parquet output codecs
//! - TOML configuration

pub mod config;
pub mod data;
pub mod domain;
pub mod indicators;
pub mod output;
pub mod pipeline;

pub use config::CollectorConfig;
pub use pipeline::{run_pipeline, RunSummary};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types handed between stages are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::TaggedBar>();
        require_sync::<domain::TaggedBar>();
        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::EnrichedBar>();
        require_sync::<domain::EnrichedBar>();
        require_send::<domain::BarTable<domain::EnrichedBar>>();
        require_sync::<domain::BarTable<domain::EnrichedBar>>();

        require_send::<data::DataError>();
        require_sync::<data::DataError>();
        require_send::<data::MemoryProvider>();
        require_sync::<data::MemoryProvider>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();

        require_send::<CollectorConfig>();
        require_sync::<CollectorConfig>();
        require_send::<RunSummary>();
        require_sync::<RunSummary>();
    }

    /// Indicators see only the bars they are given; there is no way to pass
    /// them anything beyond the series itself.
    #[test]
    fn indicator_trait_takes_only_bars() {
        fn _check_trait_object_builds(
            ind: &dyn indicators::Indicator,
            bars: &[domain::Bar],
        ) -> Vec<f64> {
            ind.compute(bars)
        }
    }
}
