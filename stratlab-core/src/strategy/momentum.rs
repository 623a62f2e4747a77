//! Momentum entry with SMA trailing exit.
//!
//! Buys when lookback momentum is positive; closes when the close falls
//! below a longer SMA.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Indicator, IndicatorValues, Momentum, Sma};

#[derive(Debug, Clone)]
pub struct MomentumSma {
    pub momentum_period: usize,
    pub sma_period: usize,
    momentum_key: String,
    sma_key: String,
}

impl MomentumSma {
    pub fn new(momentum_period: usize, sma_period: usize) -> Self {
        Self {
            momentum_period,
            sma_period,
            momentum_key: format!("momentum_{momentum_period}"),
            sma_key: format!("sma_{sma_period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(14, 50)
    }
}

impl Strategy for MomentumSma {
    fn name(&self) -> &str {
        "momentum_sma"
    }

    fn warmup_bars(&self) -> usize {
        self.momentum_period.max(self.sma_period - 1)
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Momentum::new(self.momentum_period)),
            Box::new(Sma::new(self.sma_period)),
        ]
    }

    fn decide(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        match position {
            PositionState::Flat => match valid(indicators, &self.momentum_key, bar_index) {
                Some(momentum) if momentum > 0.0 => Action::Buy,
                _ => Action::Hold,
            },
            PositionState::Long => match valid(indicators, &self.sma_key, bar_index) {
                Some(sma) if bars[bar_index].close < sma => Action::Sell,
                _ => Action::Hold,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn iv_all(momentum: f64, sma: f64) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("momentum_14".to_string(), vec![momentum]);
        iv.insert("sma_50".to_string(), vec![sma]);
        iv
    }

    #[test]
    fn buys_on_positive_momentum() {
        let bars = make_bars(&[100.0]);
        let strat = MomentumSma::default_params();
        assert_eq!(strat.decide(&bars, 0, &iv_all(2.0, 100.0), PositionState::Flat), Action::Buy);
        assert_eq!(strat.decide(&bars, 0, &iv_all(-2.0, 100.0), PositionState::Flat), Action::Hold);
    }

    #[test]
    fn exits_below_sma() {
        let bars = make_bars(&[100.0]);
        let strat = MomentumSma::default_params();
        assert_eq!(strat.decide(&bars, 0, &iv_all(2.0, 105.0), PositionState::Long), Action::Sell);
        assert_eq!(strat.decide(&bars, 0, &iv_all(2.0, 95.0), PositionState::Long), Action::Hold);
    }

    #[test]
    fn warmup_covers_sma() {
        assert_eq!(MomentumSma::default_params().warmup_bars(), 49);
    }
}
