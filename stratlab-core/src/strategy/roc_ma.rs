//! ROC + moving-average crossover confirmation.
//!
//! Buys when ROC is positive AND the fast SMA crosses above the slow SMA;
//! closes when ROC turns negative OR the fast SMA crosses back below.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Indicator, IndicatorValues, Roc, Sma};

#[derive(Debug, Clone)]
pub struct RocMaCrossover {
    pub roc_period: usize,
    pub fast_period: usize,
    pub slow_period: usize,
    roc_key: String,
    fast_key: String,
    slow_key: String,
}

impl RocMaCrossover {
    pub fn new(roc_period: usize, fast_period: usize, slow_period: usize) -> Self {
        assert!(
            slow_period > fast_period,
            "slow_period must be > fast_period"
        );
        Self {
            roc_period,
            fast_period,
            slow_period,
            roc_key: format!("roc_{roc_period}"),
            fast_key: format!("sma_{fast_period}"),
            slow_key: format!("sma_{slow_period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(12, 10, 30)
    }

    fn crossed_above(&self, indicators: &IndicatorValues, bar_index: usize) -> Option<bool> {
        if bar_index == 0 {
            return None;
        }
        let fast_cur = valid(indicators, &self.fast_key, bar_index)?;
        let slow_cur = valid(indicators, &self.slow_key, bar_index)?;
        let fast_prev = valid(indicators, &self.fast_key, bar_index - 1)?;
        let slow_prev = valid(indicators, &self.slow_key, bar_index - 1)?;
        if fast_cur > slow_cur && fast_prev <= slow_prev {
            Some(true)
        } else if fast_cur < slow_cur && fast_prev >= slow_prev {
            Some(false)
        } else {
            None
        }
    }
}

impl Strategy for RocMaCrossover {
    fn name(&self) -> &str {
        "roc_ma_crossover"
    }

    fn warmup_bars(&self) -> usize {
        self.slow_period.max(self.roc_period)
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Roc::new(self.roc_period)),
            Box::new(Sma::new(self.fast_period)),
            Box::new(Sma::new(self.slow_period)),
        ]
    }

    fn decide(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let Some(roc) = valid(indicators, &self.roc_key, bar_index) else {
            return Action::Hold;
        };
        let cross = self.crossed_above(indicators, bar_index);

        match position {
            PositionState::Flat if roc > 0.0 && cross == Some(true) => Action::Buy,
            PositionState::Long if roc < 0.0 || cross == Some(false) => Action::Sell,
            _ => Action::Hold,
        }
    }
}
