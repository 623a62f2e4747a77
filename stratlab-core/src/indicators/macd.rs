//! MACD line — fast EMA minus slow EMA.
//!
//! Only the MACD line itself; the signal line and histogram are not needed
//! by any consumer here (the model feature set reads the line).

use super::ema::ema_of_closes;
use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Macd {
    fast_period: usize,
    slow_period: usize,
    name: String,
}

impl Macd {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        assert!(fast_period >= 1, "MACD fast period must be >= 1");
        assert!(
            slow_period > fast_period,
            "MACD slow period must be > fast period"
        );
        Self {
            fast_period,
            slow_period,
            name: format!("macd_{fast_period}_{slow_period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(12, 26)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.slow_period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let fast = ema_of_closes(bars, self.fast_period);
        let slow = ema_of_closes(bars, self.slow_period);
        fast.iter().zip(&slow).map(|(f, s)| f - s).collect()
    }
}
