//! Data layer — CSV ingest, range-clipped bar feeds, multi-symbol alignment,
//! and a synthetic series generator.

pub mod align;
pub mod feed;
pub mod load;
pub mod synthetic;

pub use align::{align_union, AlignedBars};
pub use feed::BarFeed;
pub use load::load_bars_csv;
pub use synthetic::SyntheticSeries;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("no bars for '{symbol}' in range {start}..={end}")]
    DataNotFound {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("empty bar series for '{0}'")]
    EmptySeries(String),

    #[error("bars out of order at row {row}: {prev} >= {next}")]
    OutOfOrder {
        row: usize,
        prev: NaiveDate,
        next: NaiveDate,
    },

    #[error("insane bar at row {row} ({date}): high/low/close bounds violated")]
    InsaneBar { row: usize, date: NaiveDate },

    #[error("invalid date '{value}' at row {row}")]
    InvalidDate { row: usize, value: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
