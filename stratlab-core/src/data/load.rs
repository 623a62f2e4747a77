//! CSV ingest — one file per instrument, loaded read-only into `Vec<Bar>`.
//!
//! Expected columns: `Date,Open,High,Low,Close,Volume` plus any of the
//! optional auxiliary columns `FearGreed`, `PutCall`, `VIX`,
//! `PredictedClose`. Rows must be in strictly increasing date order;
//! malformed rows are load errors, not silent skips.

use super::DataError;
use crate::domain::Bar;
use chrono::NaiveDate;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: f64,
    #[serde(rename = "High")]
    high: f64,
    #[serde(rename = "Low")]
    low: f64,
    #[serde(rename = "Close")]
    close: f64,
    #[serde(rename = "Volume")]
    volume: f64,
    #[serde(rename = "FearGreed", default)]
    fear_greed: Option<f64>,
    #[serde(rename = "PutCall", default)]
    put_call: Option<f64>,
    #[serde(rename = "VIX", default)]
    vix: Option<f64>,
    #[serde(rename = "PredictedClose", default)]
    predicted_close: Option<f64>,
}

/// Load an instrument's bar series from a CSV file.
///
/// The `symbol` is stamped onto every bar; the file itself carries no symbol
/// column (one file per instrument, named after its ticker).
pub fn load_bars_csv(path: &Path, symbol: &str) -> Result<Vec<Bar>, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut bars: Vec<Bar> = Vec::new();

    for (i, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|_| {
            DataError::InvalidDate {
                row: i + 1,
                value: row.date.clone(),
            }
        })?;

        let bar = Bar {
            symbol: symbol.to_string(),
            date,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume.max(0.0) as u64,
            fear_greed: row.fear_greed,
            put_call: row.put_call,
            vix: row.vix,
            predicted_close: row.predicted_close,
        };

        if !bar.is_sane() {
            return Err(DataError::InsaneBar { row: i + 1, date });
        }
        if let Some(prev) = bars.last() {
            if prev.date >= bar.date {
                return Err(DataError::OutOfOrder {
                    row: i + 1,
                    prev: prev.date,
                    next: bar.date,
                });
            }
        }
        bars.push(bar);
    }

    if bars.is_empty() {
        return Err(DataError::EmptySeries(symbol.to_string()));
    }
    Ok(bars)
}
