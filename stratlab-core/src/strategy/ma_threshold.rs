//! Single moving-average threshold — close above/below its SMA.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Indicator, IndicatorValues, Sma};

/// Buys when the close is above its SMA, closes when below.
#[derive(Debug, Clone)]
pub struct MaThreshold {
    pub period: usize,
    key: String,
}

impl MaThreshold {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "period must be >= 1");
        Self {
            period,
            key: format!("sma_{period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(30)
    }
}

impl Strategy for MaThreshold {
    fn name(&self) -> &str {
        "ma_threshold"
    }

    fn warmup_bars(&self) -> usize {
        self.period - 1
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![Box::new(Sma::new(self.period))]
    }

    fn decide(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let Some(sma) = valid(indicators, &self.key, bar_index) else {
            return Action::Hold;
        };
        let close = bars[bar_index].close;

        match position {
            PositionState::Flat if close > sma => Action::Buy,
            PositionState::Long if close < sma => Action::Sell,
            _ => Action::Hold,
        }
    }
}
