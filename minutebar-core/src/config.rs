//! Collector configuration.
//!
//! Stored as TOML; every field has a default so an empty file is a valid
//! config:
//!
//! ```toml
//! symbols = ["NFLX", "DIS"]
//! output_dir = "."
//! format = "csv"
//! interval = "1m"
//! window_minutes = 15
//! timeout_secs = 30
//! ```

use crate::data::{BarInterval, DataError};
use crate::domain::StaticSymbol;
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub symbols: Vec<String>,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub interval: BarInterval,
    /// Trailing VWAP window, in minutes.
    pub window_minutes: u32,
    /// HTTP timeout for the market-data provider.
    pub timeout_secs: u64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["NFLX".into(), "DIS".into()],
            output_dir: PathBuf::from("."),
            format: OutputFormat::Csv,
            interval: BarInterval::OneMinute,
            window_minutes: 15,
            timeout_secs: 30,
        }
    }
}

impl CollectorConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, DataError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DataError::Config(format!("parse config TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, DataError> {
        toml::to_string_pretty(self).map_err(|e| DataError::Config(format!("serialize config: {e}")))
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.symbols.is_empty() {
            return Err(DataError::Config("at least one symbol is required".into()));
        }
        if let Some(blank) = self.symbols.iter().find(|s| s.trim().is_empty()) {
            return Err(DataError::InvalidSymbol(blank.clone()));
        }
        if self.window_minutes == 0 {
            return Err(DataError::Config("window_minutes must be positive".into()));
        }
        Ok(())
    }

    /// The VWAP window as a duration.
    pub fn window(&self) -> chrono::Duration {
        chrono::Duration::minutes(i64::from(self.window_minutes))
    }

    pub fn timeout(&self) -> StdDuration {
        StdDuration::from_secs(self.timeout_secs)
    }

    /// One symbol provider per configured ticker, in order.
    pub fn symbol_providers(&self) -> Vec<StaticSymbol> {
        self.symbols.iter().map(|s| StaticSymbol::new(s.trim())).collect()
    }
}
