//! Bar — the fundamental market data unit.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// OHLCV bar for a single symbol on a single day.
///
/// Beyond price columns, a bar may carry auxiliary scalar signals that are
/// precomputed upstream and replayed alongside prices: a fear/greed index
/// reading, an options put/call ratio, a volatility index level, and a
/// model-predicted close. Absent columns are `None` for every bar of a feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub fear_greed: Option<f64>,
    pub put_call: Option<f64>,
    pub vix: Option<f64>,
    pub predicted_close: Option<f64>,
}

/// Selector for an auxiliary signal column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuxSignal {
    FearGreed,
    PutCall,
    Vix,
    PredictedClose,
}

impl AuxSignal {
    /// Column name as it appears in input CSVs and log lines.
    pub fn column(&self) -> &'static str {
        match self {
            AuxSignal::FearGreed => "FearGreed",
            AuxSignal::PutCall => "PutCall",
            AuxSignal::Vix => "VIX",
            AuxSignal::PredictedClose => "PredictedClose",
        }
    }
}

impl Bar {
    /// Read an auxiliary signal value, if the column is present on this bar.
    pub fn aux(&self, signal: AuxSignal) -> Option<f64> {
        match signal {
            AuxSignal::FearGreed => self.fear_greed,
            AuxSignal::PutCall => self.put_call,
            AuxSignal::Vix => self.vix,
            AuxSignal::PredictedClose => self.predicted_close,
        }
    }

    /// Basic OHLCV sanity check: high >= low, high bounds open/close, prices positive.
    pub fn is_sane(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}
