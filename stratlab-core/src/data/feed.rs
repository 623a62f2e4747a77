//! BarFeed — an ordered, immutable, forward-only bar sequence.

use super::DataError;
use crate::domain::Bar;
use chrono::NaiveDate;

/// An instrument's bar series clipped to a date range.
///
/// Construction fails with `DataError::DataNotFound` when no bars fall inside
/// `[start, end]`. Iteration is forward-only; the underlying bars are never
/// mutated after load.
#[derive(Debug, Clone)]
pub struct BarFeed {
    symbol: String,
    bars: Vec<Bar>,
}

impl BarFeed {
    /// Clip `bars` to `[start, end]` (inclusive on both ends).
    ///
    /// `bars` must already be in strictly increasing date order, as produced
    /// by `load_bars_csv`.
    pub fn new(
        symbol: impl Into<String>,
        bars: Vec<Bar>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Self, DataError> {
        let symbol = symbol.into();
        let clipped: Vec<Bar> = bars
            .into_iter()
            .filter(|b| b.date >= start && b.date <= end)
            .collect();

        if clipped.is_empty() {
            return Err(DataError::DataNotFound { symbol, start, end });
        }
        Ok(Self {
            symbol,
            bars: clipped,
        })
    }

    /// Wrap a full series without clipping. Fails on an empty series.
    pub fn from_bars(symbol: impl Into<String>, bars: Vec<Bar>) -> Result<Self, DataError> {
        let symbol = symbol.into();
        if bars.is_empty() {
            return Err(DataError::EmptySeries(symbol));
        }
        Ok(Self { symbol, bars })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.bars[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.bars[self.bars.len() - 1].date
    }
}
