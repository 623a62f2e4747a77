//! Indicators — pure functions over bar history, precomputed once per run.
//!
//! Every indicator maps the full bar series to an equal-length `Vec<f64>`
//! whose first `lookback()` values are `f64::NAN` (warmup). The engine
//! computes each series exactly once before the bar loop and serves per-bar
//! values out of `IndicatorValues`; nothing is recomputed inside the loop.
//!
//! Bar closes are validated finite at load time, so implementations only
//! need to produce the NaN warmup prefix, never to guard against NaN input.
//!
//! No indicator value at bar t may depend on data from bar t+1 or later.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod momentum;
pub mod roc;
pub mod rsi;
pub mod sma;

pub use bollinger::{Bollinger, BollingerBand};
pub use ema::Ema;
pub use macd::Macd;
pub use momentum::Momentum;
pub use roc::Roc;
pub use rsi::Rsi;
pub use sma::Sma;

use crate::domain::Bar;
use std::collections::HashMap;

/// Trait for indicators.
pub trait Indicator: Send + Sync {
    /// Series name, also the lookup key (e.g. "sma_30", "rsi_14").
    fn name(&self) -> &str;

    /// Number of bars before the first valid (non-NaN) output value.
    fn lookback(&self) -> usize;

    /// Compute the full output series; same length as `bars`.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Precomputed indicator series, keyed by indicator name.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute and store every indicator in `set` over `bars`. Duplicate
    /// names overwrite; identical instances produce identical series, so the
    /// last write wins harmlessly.
    pub fn precompute(set: &[Box<dyn Indicator>], bars: &[Bar]) -> Self {
        let mut values = Self::new();
        for indicator in set {
            values.insert(indicator.name().to_string(), indicator.compute(bars));
        }
        values
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Value of a named series at a bar index; `None` when the series is
    /// missing or the index out of range, `Some(NaN)` during warmup.
    pub fn get(&self, name: &str, bar_index: usize) -> Option<f64> {
        self.series
            .get(name)
            .and_then(|v| v.get(bar_index).copied())
    }

    pub fn get_series(&self, name: &str) -> Option<&[f64]> {
        self.series.get(name).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Create synthetic bars from close prices for testing.
///
/// Open = previous close (or close for the first bar), high/low pad the
/// open/close envelope by 1.0, volume fixed.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base_date = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                symbol: "TEST".to_string(),
                date: base_date + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: (open.min(close) - 1.0).max(0.01),
                close,
                volume: 1000,
                fear_greed: None,
                put_call: None,
                vix: None,
                predicted_close: None,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, epsilon={epsilon}"
    );
}

#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
