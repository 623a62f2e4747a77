//! Bollinger-band mean reversion.
//!
//! Buys when the close dips below the lower band, closes the position when
//! the close rises above the upper band.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Bollinger, Indicator, IndicatorValues};

#[derive(Debug, Clone)]
pub struct BollingerReversion {
    pub period: usize,
    pub multiplier: f64,
    upper_key: String,
    lower_key: String,
}

impl BollingerReversion {
    pub fn new(period: usize, multiplier: f64) -> Self {
        let upper = Bollinger::upper(period, multiplier);
        let lower = Bollinger::lower(period, multiplier);
        Self {
            period,
            multiplier,
            upper_key: upper.name().to_string(),
            lower_key: lower.name().to_string(),
        }
    }

    pub fn default_params() -> Self {
        Self::new(20, 2.0)
    }
}

impl Strategy for BollingerReversion {
    fn name(&self) -> &str {
        "bollinger_reversion"
    }

    fn warmup_bars(&self) -> usize {
        self.period - 1
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Bollinger::upper(self.period, self.multiplier)),
            Box::new(Bollinger::lower(self.period, self.multiplier)),
        ]
    }

    fn decide(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let close = bars[bar_index].close;
        match position {
            PositionState::Flat => match valid(indicators, &self.lower_key, bar_index) {
                Some(lower) if close < lower => Action::Buy,
                _ => Action::Hold,
            },
            PositionState::Long => match valid(indicators, &self.upper_key, bar_index) {
                Some(upper) if close > upper => Action::Sell,
                _ => Action::Hold,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn iv_bands(upper: Vec<f64>, lower: Vec<f64>) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("bollinger_upper_20_2".to_string(), upper);
        iv.insert("bollinger_lower_20_2".to_string(), lower);
        iv
    }

    #[test]
    fn buys_below_lower_band() {
        let bars = make_bars(&[100.0, 88.0]);
        let iv = iv_bands(vec![110.0, 110.0], vec![90.0, 90.0]);
        let strat = BollingerReversion::default_params();
        assert_eq!(strat.decide(&bars, 1, &iv, PositionState::Flat), Action::Buy);
    }

    #[test]
    fn sells_above_upper_band() {
        let bars = make_bars(&[100.0, 112.0]);
        let iv = iv_bands(vec![110.0, 110.0], vec![90.0, 90.0]);
        let strat = BollingerReversion::default_params();
        assert_eq!(strat.decide(&bars, 1, &iv, PositionState::Long), Action::Sell);
    }

    #[test]
    fn holds_inside_bands() {
        let bars = make_bars(&[100.0, 100.0]);
        let iv = iv_bands(vec![110.0, 110.0], vec![90.0, 90.0]);
        let strat = BollingerReversion::default_params();
        assert_eq!(strat.decide(&bars, 1, &iv, PositionState::Flat), Action::Hold);
        assert_eq!(strat.decide(&bars, 1, &iv, PositionState::Long), Action::Hold);
    }

    #[test]
    fn holds_on_warmup_nan() {
        let bars = make_bars(&[88.0]);
        let iv = iv_bands(vec![f64::NAN], vec![f64::NAN]);
        let strat = BollingerReversion::default_params();
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Flat), Action::Hold);
    }

    #[test]
    fn wires_upper_and_lower_bands() {
        let strat = BollingerReversion::default_params();
        let names: Vec<String> = strat.indicators().iter().map(|i| i.name().to_string()).collect();
        assert_eq!(names, vec!["bollinger_upper_20_2", "bollinger_lower_20_2"]);
    }
}
