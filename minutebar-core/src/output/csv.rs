//! CSV codec for enriched bar tables.
//!
//! Columns: Datetime, Open, High, Low, Close, Volume, Ticker, VWAP, DollarValue
//!
//! Floats are written in shortest round-trip form so a re-read reproduces the
//! exact values. NaN is written as an empty field; infinities as `inf`/`-inf`.

use super::{COLUMNS, DATETIME_FORMAT};
use crate::data::DataError;
use crate::domain::{Bar, EnrichedBar};
use chrono::DateTime;
use std::io::{Read, Write};

/// Write rows, header first, in the order given.
pub fn write_csv<W: Write>(writer: W, rows: &[EnrichedBar]) -> Result<(), DataError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(COLUMNS)?;

    for r in rows {
        let b = &r.bar;
        wtr.write_record([
            b.timestamp.format(DATETIME_FORMAT).to_string(),
            format_float(b.open),
            format_float(b.high),
            format_float(b.low),
            format_float(b.close),
            b.volume.to_string(),
            b.symbol.clone(),
            format_float(r.vwap),
            format_float(r.dollar_value),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Read rows written by [`write_csv`]. Columns are located by header name.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<EnrichedBar>, DataError> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut idx = [0usize; COLUMNS.len()];
    for (slot, name) in idx.iter_mut().zip(COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DataError::MissingColumn {
                column: name.to_string(),
            })?;
    }
    let [dt, open, high, low, close, volume, ticker, vwap, dollar_value] = idx;

    let mut rows = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        let field = |i: usize| record.get(i).unwrap_or("");

        let timestamp = DateTime::parse_from_str(field(dt), DATETIME_FORMAT)
            .map_err(|_| invalid(row, COLUMNS[0], field(dt)))?;
        let volume_value = field(volume)
            .parse::<u64>()
            .map_err(|_| invalid(row, COLUMNS[5], field(volume)))?;

        rows.push(EnrichedBar {
            bar: Bar {
                symbol: field(ticker).to_string(),
                timestamp,
                open: parse_float(row, COLUMNS[1], field(open))?,
                high: parse_float(row, COLUMNS[2], field(high))?,
                low: parse_float(row, COLUMNS[3], field(low))?,
                close: parse_float(row, COLUMNS[4], field(close))?,
                volume: volume_value,
            },
            vwap: parse_float(row, COLUMNS[7], field(vwap))?,
            dollar_value: parse_float(row, COLUMNS[8], field(dollar_value))?,
        });
    }

    Ok(rows)
}

fn format_float(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else if v.is_infinite() {
        if v > 0.0 { "inf".into() } else { "-inf".into() }
    } else {
        v.to_string()
    }
}

fn parse_float(row: usize, column: &str, s: &str) -> Result<f64, DataError> {
    if s.is_empty() {
        return Ok(f64::NAN);
    }
    s.parse::<f64>().map_err(|_| invalid(row, column, s))
}

fn invalid(row: usize, column: &str, value: &str) -> DataError {
    DataError::InvalidField {
        row,
        column: column.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ts: &str, symbol: &str, close: f64, vwap: f64) -> EnrichedBar {
        EnrichedBar {
            bar: Bar {
                symbol: symbol.into(),
                timestamp: DateTime::parse_from_rfc3339(ts).unwrap(),
                open: close,
                high: close + 0.25,
                low: close - 0.25,
                close,
                volume: 1_500,
            },
            vwap,
            dollar_value: close * 1_500.0,
        }
    }

    fn to_string(rows: &[EnrichedBar]) -> String {
        let mut buf = Vec::new();
        write_csv(&mut buf, rows).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_datetime_layout() {
        let out = to_string(&[row("2024-03-04T09:30:00-05:00", "NFLX", 601.5, 601.25)]);
        let mut lines = out.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Datetime,Open,High,Low,Close,Volume,Ticker,VWAP,DollarValue"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2024-03-04 09:30:00-05:00,601.5,601.75,601.25,601.5,1500,NFLX,601.25,902250"
        );
    }

    #[test]
    fn non_finite_vwap_layout() {
        let out = to_string(&[
            row("2024-03-04T09:30:00-05:00", "DIS", 100.0, f64::NAN),
            row("2024-03-04T09:31:00-05:00", "DIS", 100.0, f64::INFINITY),
        ]);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[1].ends_with(",DIS,,150000"));
        assert!(lines[2].ends_with(",DIS,inf,150000"));
    }

    #[test]
    fn reread_reproduces_rows() {
        let rows = vec![
            row("2024-03-04T09:30:00-05:00", "NFLX", 601.37, 601.1234567),
            row("2024-03-04T09:31:00-05:00", "DIS", 110.02, f64::NAN),
        ];
        let out = to_string(&rows);
        let back = read_csv(out.as_bytes()).unwrap();

        assert_eq!(back.len(), 2);
        assert_eq!(back[0], rows[0]);
        assert_eq!(back[1].bar, rows[1].bar);
        assert!(back[1].vwap.is_nan());
    }

    #[test]
    fn columns_are_found_by_name() {
        let csv = "Ticker,Datetime,Open,High,Low,Close,Volume,VWAP,DollarValue\n\
                   DIS,2024-03-04 09:30:00-05:00,1,2,0.5,1.5,10,1.25,15\n";
        let back = read_csv(csv.as_bytes()).unwrap();
        assert_eq!(back[0].bar.symbol, "DIS");
        assert_eq!(back[0].bar.close, 1.5);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "Datetime,Open,High,Low,Close,Volume,Ticker,VWAP\n";
        match read_csv(csv.as_bytes()) {
            Err(DataError::MissingColumn { column }) => assert_eq!(column, "DollarValue"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn bad_number_is_reported_with_position() {
        let csv = "Datetime,Open,High,Low,Close,Volume,Ticker,VWAP,DollarValue\n\
                   2024-03-04 09:30:00-05:00,abc,2,0.5,1.5,10,DIS,1.25,15\n";
        match read_csv(csv.as_bytes()) {
            Err(DataError::InvalidField { row, column, value }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "Open");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }
}
