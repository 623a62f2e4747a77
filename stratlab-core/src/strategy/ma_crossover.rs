//! Dual moving-average crossover.
//!
//! Buys when the fast SMA crosses above the slow SMA, closes when it
//! crosses back below. Crossing is detected against the previous bar, so the
//! signal fires exactly once per cross.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Indicator, IndicatorValues, Sma};

#[derive(Debug, Clone)]
pub struct MaCrossover {
    pub fast_period: usize,
    pub slow_period: usize,
    fast_key: String,
    slow_key: String,
}

impl MaCrossover {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        assert!(fast_period >= 1, "fast_period must be >= 1");
        assert!(
            slow_period > fast_period,
            "slow_period must be > fast_period"
        );
        Self {
            fast_period,
            slow_period,
            fast_key: format!("sma_{fast_period}"),
            slow_key: format!("sma_{slow_period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(5, 37)
    }

    /// Crossing state at `bar_index` vs. the previous bar, if all four MA
    /// values are valid.
    fn cross(&self, indicators: &IndicatorValues, bar_index: usize) -> Option<Cross> {
        if bar_index == 0 {
            return None;
        }
        let fast_cur = valid(indicators, &self.fast_key, bar_index)?;
        let slow_cur = valid(indicators, &self.slow_key, bar_index)?;
        let fast_prev = valid(indicators, &self.fast_key, bar_index - 1)?;
        let slow_prev = valid(indicators, &self.slow_key, bar_index - 1)?;

        if fast_cur > slow_cur && fast_prev <= slow_prev {
            Some(Cross::Above)
        } else if fast_cur < slow_cur && fast_prev >= slow_prev {
            Some(Cross::Below)
        } else {
            Some(Cross::None)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cross {
    Above,
    Below,
    None,
}

impl Strategy for MaCrossover {
    fn name(&self) -> &str {
        "ma_crossover"
    }

    fn warmup_bars(&self) -> usize {
        // Previous-bar slow MA must be valid too.
        self.slow_period
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
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
        match (self.cross(indicators, bar_index), position) {
            (Some(Cross::Above), PositionState::Flat) => Action::Buy,
            (Some(Cross::Below), PositionState::Long) => Action::Sell,
            _ => Action::Hold,
        }
    }
}
