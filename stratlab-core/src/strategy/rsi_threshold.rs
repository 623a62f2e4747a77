//! RSI oscillator thresholds — buy oversold, close overbought.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Indicator, IndicatorValues, Rsi};

#[derive(Debug, Clone)]
pub struct RsiThreshold {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
    key: String,
}

impl RsiThreshold {
    pub fn new(period: usize, oversold: f64, overbought: f64) -> Self {
        assert!(
            oversold < overbought,
            "oversold level must be below overbought level"
        );
        Self {
            period,
            oversold,
            overbought,
            key: format!("rsi_{period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(14, 30.0, 70.0)
    }
}

impl Strategy for RsiThreshold {
    fn name(&self) -> &str {
        "rsi_threshold"
    }

    fn warmup_bars(&self) -> usize {
        self.period
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![Box::new(Rsi::new(self.period))]
    }

    fn decide(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let Some(rsi) = valid(indicators, &self.key, bar_index) else {
            return Action::Hold;
        };
        match position {
            PositionState::Flat if rsi < self.oversold => Action::Buy,
            PositionState::Long if rsi > self.overbought => Action::Sell,
            _ => Action::Hold,
        }
    }
}
