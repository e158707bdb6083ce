//! Combined daily output: merge per-symbol tables and write one dated file.
//!
//! Layout: `{output_dir}/{YYYY-MM-DD}.{csv|parquet}`, where the date is the
//! exchange-local date of the earliest row.
//!
//! Writes are atomic (write to .tmp, rename into place).

pub mod csv;
pub mod parquet;

use crate::data::DataError;
use crate::domain::{BarTable, EnrichedBar};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{info, warn};

/// Output columns, in file order. `Datetime` is the index column.
pub const COLUMNS: [&str; 9] = [
    "Datetime",
    "Open",
    "High",
    "Low",
    "Close",
    "Volume",
    "Ticker",
    "VWAP",
    "DollarValue",
];

/// Timestamp layout of the `Datetime` column, e.g. `2024-03-04 09:30:00-05:00`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%:z";

/// File format of the daily output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Parquet => "parquet",
        }
    }

    /// Format implied by a file extension; anything unrecognized reads as CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => OutputFormat::Parquet,
            _ => OutputFormat::Csv,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "parquet" => Ok(OutputFormat::Parquet),
            other => Err(format!("unknown output format '{other}' (expected csv or parquet)")),
        }
    }
}

/// Concatenate tables and stable-sort all rows by timestamp.
///
/// Rows sharing a timestamp keep their input order.
pub fn merge_sorted(tables: Vec<BarTable<EnrichedBar>>) -> Vec<EnrichedBar> {
    let mut rows: Vec<EnrichedBar> = tables.into_iter().flat_map(|t| t.rows).collect();
    rows.sort_by_key(|r| r.bar.timestamp);
    rows
}

/// Output path named after the first row's local date, or `None` with no rows.
pub fn output_path(dir: &Path, rows: &[EnrichedBar], format: OutputFormat) -> Option<PathBuf> {
    let first = rows.first()?;
    Some(dir.join(format!(
        "{}.{}",
        first.bar.local_date().format("%Y-%m-%d"),
        format.extension()
    )))
}

/// Merge, sort and write the day's tables.
///
/// Returns the written path, or `None` when there was nothing to write.
pub fn write_combined(
    tables: Vec<BarTable<EnrichedBar>>,
    dir: &Path,
    format: OutputFormat,
) -> Result<Option<PathBuf>, DataError> {
    let symbols: Vec<String> = tables.iter().map(|t| t.symbol.clone()).collect();
    let rows = merge_sorted(tables);

    let Some(path) = output_path(dir, &rows, format) else {
        warn!(symbols = ?symbols, "no rows to write, skipping output");
        return Ok(None);
    };

    fs::create_dir_all(dir)?;
    write_rows(&path, &rows, format)?;

    info!(path = %path.display(), rows = rows.len(), "data written to file");
    Ok(Some(path))
}

/// Write rows to `path` atomically.
pub fn write_rows(path: &Path, rows: &[EnrichedBar], format: OutputFormat) -> Result<(), DataError> {
    let tmp_path = path.with_extension(format!("{}.tmp", format.extension()));

    let written = match format {
        OutputFormat::Csv => fs::File::create(&tmp_path)
            .map_err(DataError::from)
            .and_then(|file| csv::write_csv(file, rows)),
        OutputFormat::Parquet => parquet::write_parquet(&tmp_path, rows),
    };

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        DataError::Io(e)
    })
}

/// Read an output file back, choosing the codec from its extension.
pub fn read_output(path: &Path) -> Result<Vec<EnrichedBar>, DataError> {
    match OutputFormat::from_path(path) {
        OutputFormat::Csv => csv::read_csv(fs::File::open(path)?),
        OutputFormat::Parquet => parquet::read_parquet(path),
    }
}
