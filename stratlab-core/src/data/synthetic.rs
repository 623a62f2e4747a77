//! Synthetic bar series — seeded random walks for demos, benches, and tests.

use crate::domain::Bar;
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator for a deterministic geometric random-walk OHLCV series.
#[derive(Debug, Clone)]
pub struct SyntheticSeries {
    pub symbol: String,
    pub start_price: f64,
    /// Per-bar drift (e.g. 0.0003).
    pub drift: f64,
    /// Per-bar volatility (e.g. 0.01).
    pub volatility: f64,
    pub seed: u64,
}

impl SyntheticSeries {
    pub fn new(symbol: impl Into<String>, seed: u64) -> Self {
        Self {
            symbol: symbol.into(),
            start_price: 100.0,
            drift: 0.0003,
            volatility: 0.01,
            seed,
        }
    }

    /// Generate `n` daily bars starting at `start` (weekends included; the
    /// feed replays whatever calendar it is given).
    pub fn generate(&self, start: NaiveDate, n: usize) -> Vec<Bar> {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut close = self.start_price;
        let mut bars = Vec::with_capacity(n);

        for i in 0..n {
            let open = close;
            let shock: f64 = rng.gen_range(-1.0..1.0);
            close = (open * (1.0 + self.drift + self.volatility * shock)).max(0.01);
            let span = open.max(close) * self.volatility * rng.gen_range(0.0..1.0);
            let high = open.max(close) + span;
            let low = (open.min(close) - span).max(0.01);
            let volume = rng.gen_range(10_000..1_000_000);

            bars.push(Bar {
                symbol: self.symbol.clone(),
                date: start + chrono::Duration::days(i as i64),
                open,
                high,
                low,
                close,
                volume,
                fear_greed: None,
                put_call: None,
                vix: None,
                predicted_close: None,
            });
        }
        bars
    }
}
