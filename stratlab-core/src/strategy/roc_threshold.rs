//! Rate-of-change threshold momentum.
//!
//! Buys when ROC exceeds the threshold, closes when ROC drops below the
//! negated threshold.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Indicator, IndicatorValues, Roc};

#[derive(Debug, Clone)]
pub struct RocThreshold {
    pub period: usize,
    /// Fractional threshold (0.08 = 8%).
    pub threshold: f64,
    key: String,
}

impl RocThreshold {
    pub fn new(period: usize, threshold: f64) -> Self {
        assert!(
            threshold > 0.0 && threshold.is_finite(),
            "threshold must be positive and finite"
        );
        Self {
            period,
            threshold,
            key: format!("roc_{period}"),
        }
    }

    pub fn default_params() -> Self {
        Self::new(20, 0.08)
    }
}

impl Strategy for RocThreshold {
    fn name(&self) -> &str {
        "roc_threshold"
    }

    fn warmup_bars(&self) -> usize {
        self.period
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![Box::new(Roc::new(self.period))]
    }

    fn decide(
        &self,
        _bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let Some(roc) = valid(indicators, &self.key, bar_index) else {
            return Action::Hold;
        };
        match position {
            PositionState::Flat if roc > self.threshold => Action::Buy,
            PositionState::Long if roc < -self.threshold => Action::Sell,
            _ => Action::Hold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn iv_roc(value: f64) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("roc_20".to_string(), vec![value]);
        iv
    }

    #[test]
    fn buys_above_threshold() {
        let bars = make_bars(&[100.0]);
        let strat = RocThreshold::default_params();
        assert_eq!(strat.decide(&bars, 0, &iv_roc(0.10), PositionState::Flat), Action::Buy);
    }

    #[test]
    fn sells_below_negative_threshold() {
        let bars = make_bars(&[100.0]);
        let strat = RocThreshold::default_params();
        assert_eq!(strat.decide(&bars, 0, &iv_roc(-0.10), PositionState::Long), Action::Sell);
    }

    #[test]
    fn holds_in_dead_zone() {
        let bars = make_bars(&[100.0]);
        let strat = RocThreshold::default_params();
        assert_eq!(strat.decide(&bars, 0, &iv_roc(0.05), PositionState::Flat), Action::Hold);
        assert_eq!(strat.decide(&bars, 0, &iv_roc(-0.05), PositionState::Long), Action::Hold);
    }

    #[test]
    #[should_panic(expected = "threshold must be positive and finite")]
    fn rejects_non_positive_threshold() {
        RocThreshold::new(20, 0.0);
    }
}
