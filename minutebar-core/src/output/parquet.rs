//! Parquet codec for enriched bar tables.
//!
//! Same columns as the CSV output. `Datetime` is stored as a string in the
//! CSV layout so the exchange offset survives the round trip.

use super::{COLUMNS, DATETIME_FORMAT};
use crate::data::DataError;
use crate::domain::{Bar, EnrichedBar};
use chrono::DateTime;
use polars::prelude::*;
use std::fs;
use std::path::Path;

/// Write rows to a Parquet file.
pub fn write_parquet(path: &Path, rows: &[EnrichedBar]) -> Result<(), DataError> {
    let mut df = rows_to_dataframe(rows)?;
    let file =
        fs::File::create(path).map_err(|e| DataError::ParquetError(format!("create file: {e}")))?;
    ParquetWriter::new(file)
        .finish(&mut df)
        .map_err(|e| DataError::ParquetError(format!("write parquet: {e}")))?;
    Ok(())
}

/// Read rows written by [`write_parquet`].
pub fn read_parquet(path: &Path) -> Result<Vec<EnrichedBar>, DataError> {
    let file = fs::File::open(path).map_err(|e| DataError::ParquetError(format!("open: {e}")))?;
    let df = ParquetReader::new(file)
        .finish()
        .map_err(|e| DataError::ParquetError(format!("read: {e}")))?;

    for name in COLUMNS {
        if df.column(name).is_err() {
            return Err(DataError::MissingColumn {
                column: name.to_string(),
            });
        }
    }

    dataframe_to_rows(&df)
}

fn rows_to_dataframe(rows: &[EnrichedBar]) -> Result<DataFrame, DataError> {
    let datetimes: Vec<String> = rows
        .iter()
        .map(|r| r.bar.timestamp.format(DATETIME_FORMAT).to_string())
        .collect();
    let opens: Vec<f64> = rows.iter().map(|r| r.bar.open).collect();
    let highs: Vec<f64> = rows.iter().map(|r| r.bar.high).collect();
    let lows: Vec<f64> = rows.iter().map(|r| r.bar.low).collect();
    let closes: Vec<f64> = rows.iter().map(|r| r.bar.close).collect();
    let volumes: Vec<u64> = rows.iter().map(|r| r.bar.volume).collect();
    let tickers: Vec<String> = rows.iter().map(|r| r.bar.symbol.clone()).collect();
    let vwaps: Vec<f64> = rows.iter().map(|r| r.vwap).collect();
    let dollar_values: Vec<f64> = rows.iter().map(|r| r.dollar_value).collect();

    DataFrame::new(vec![
        Column::new(COLUMNS[0].into(), datetimes),
        Column::new(COLUMNS[1].into(), opens),
        Column::new(COLUMNS[2].into(), highs),
        Column::new(COLUMNS[3].into(), lows),
        Column::new(COLUMNS[4].into(), closes),
        Column::new(COLUMNS[5].into(), volumes),
        Column::new(COLUMNS[6].into(), tickers),
        Column::new(COLUMNS[7].into(), vwaps),
        Column::new(COLUMNS[8].into(), dollar_values),
    ])
    .map_err(|e| DataError::ParquetError(format!("dataframe creation: {e}")))
}

fn dataframe_to_rows(df: &DataFrame) -> Result<Vec<EnrichedBar>, DataError> {
    let map_err = |e: PolarsError| DataError::ParquetError(format!("column read: {e}"));
    let type_err =
        |name: &str, e: PolarsError| DataError::ParquetError(format!("{name} column type: {e}"));

    let dt_ca = df
        .column(COLUMNS[0])
        .map_err(map_err)?
        .str()
        .map_err(|e| type_err(COLUMNS[0], e))?;
    let f64_col = |name: &str| -> Result<Float64Chunked, DataError> {
        Ok(df
            .column(name)
            .map_err(map_err)?
            .f64()
            .map_err(|e| type_err(name, e))?
            .clone())
    };
    let open_ca = f64_col(COLUMNS[1])?;
    let high_ca = f64_col(COLUMNS[2])?;
    let low_ca = f64_col(COLUMNS[3])?;
    let close_ca = f64_col(COLUMNS[4])?;
    let vol_ca = df
        .column(COLUMNS[5])
        .map_err(map_err)?
        .u64()
        .map_err(|e| type_err(COLUMNS[5], e))?;
    let ticker_ca = df
        .column(COLUMNS[6])
        .map_err(map_err)?
        .str()
        .map_err(|e| type_err(COLUMNS[6], e))?;
    let vwap_ca = f64_col(COLUMNS[7])?;
    let dv_ca = f64_col(COLUMNS[8])?;

    let n = df.height();
    let mut rows = Vec::with_capacity(n);

    for i in 0..n {
        let raw_dt = dt_ca.get(i).unwrap_or("");
        let timestamp = DateTime::parse_from_str(raw_dt, DATETIME_FORMAT).map_err(|_| {
            DataError::InvalidField {
                row: i,
                column: COLUMNS[0].to_string(),
                value: raw_dt.to_string(),
            }
        })?;

        rows.push(EnrichedBar {
            bar: Bar {
                symbol: ticker_ca.get(i).unwrap_or("").to_string(),
                timestamp,
                open: open_ca.get(i).unwrap_or(f64::NAN),
                high: high_ca.get(i).unwrap_or(f64::NAN),
                low: low_ca.get(i).unwrap_or(f64::NAN),
                close: close_ca.get(i).unwrap_or(f64::NAN),
                volume: vol_ca.get(i).unwrap_or(0),
            },
            vwap: vwap_ca.get(i).unwrap_or(f64::NAN),
            dollar_value: dv_ca.get(i).unwrap_or(f64::NAN),
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU64, Ordering};

    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

    fn temp_file() -> PathBuf {
        let id = TEST_COUNTER.fetch_add(1, Ordering::Relaxed);
        env::temp_dir().join(format!("minutebar_parquet_{}_{id}.parquet", std::process::id()))
    }

    fn sample_rows() -> Vec<EnrichedBar> {
        ["2024-03-04T09:30:00-05:00", "2024-03-04T09:31:00-05:00"]
            .iter()
            .zip(["NFLX", "DIS"])
            .map(|(ts, sym)| EnrichedBar {
                bar: Bar {
                    symbol: sym.into(),
                    timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
                    open: 100.0,
                    high: 101.0,
                    low: 99.5,
                    close: 100.5,
                    volume: 700,
                },
                vwap: 100.33,
                dollar_value: 70_350.0,
            })
            .collect()
    }

    #[test]
    fn write_and_read_roundtrip() {
        let path = temp_file();
        let rows = sample_rows();

        write_parquet(&path, &rows).unwrap();
        let back = read_parquet(&path).unwrap();

        assert_eq!(back, rows);
        assert_eq!(back[0].bar.timestamp.offset().local_minus_utc(), -5 * 3600);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn nan_vwap_survives() {
        let path = temp_file();
        let mut rows = sample_rows();
        rows[1].vwap = f64::NAN;

        write_parquet(&path, &rows).unwrap();
        let back = read_parquet(&path).unwrap();
        assert!(back[1].vwap.is_nan());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_column_is_reported() {
        let path = temp_file();
        let mut df = df!("Datetime" => &["2024-03-04 09:30:00-05:00"]).unwrap();
        let file = fs::File::create(&path).unwrap();
        ParquetWriter::new(file).finish(&mut df).unwrap();

        match read_parquet(&path) {
            Err(DataError::MissingColumn { column }) => assert_eq!(column, "Open"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }

        let _ = fs::remove_file(&path);
    }
}
