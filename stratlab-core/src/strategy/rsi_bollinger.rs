//! Composite RSI + Bollinger mean reversion.
//!
//! Buys when RSI is oversold AND the close sits at or below the lower band;
//! closes when RSI is overbought OR the close reaches the upper band.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Bollinger, Indicator, IndicatorValues, Rsi};

#[derive(Debug, Clone)]
pub struct RsiBollinger {
    pub rsi_period: usize,
    pub bb_period: usize,
    pub bb_multiplier: f64,
    pub oversold: f64,
    pub overbought: f64,
    rsi_key: String,
    upper_key: String,
    lower_key: String,
}

impl RsiBollinger {
    pub fn new(
        rsi_period: usize,
        bb_period: usize,
        bb_multiplier: f64,
        oversold: f64,
        overbought: f64,
    ) -> Self {
        assert!(
            oversold < overbought,
            "oversold level must be below overbought level"
        );
        Self {
            rsi_period,
            bb_period,
            bb_multiplier,
            oversold,
            overbought,
            rsi_key: format!("rsi_{rsi_period}"),
            upper_key: Bollinger::upper(bb_period, bb_multiplier).name().to_string(),
            lower_key: Bollinger::lower(bb_period, bb_multiplier).name().to_string(),
        }
    }

    pub fn default_params() -> Self {
        Self::new(14, 20, 2.0, 30.0, 70.0)
    }
}

impl Strategy for RsiBollinger {
    fn name(&self) -> &str {
        "rsi_bollinger"
    }

    fn warmup_bars(&self) -> usize {
        self.rsi_period.max(self.bb_period - 1)
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Rsi::new(self.rsi_period)),
            Box::new(Bollinger::upper(self.bb_period, self.bb_multiplier)),
            Box::new(Bollinger::lower(self.bb_period, self.bb_multiplier)),
        ]
    }

    fn decide(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let Some(rsi) = valid(indicators, &self.rsi_key, bar_index) else {
            return Action::Hold;
        };
        let close = bars[bar_index].close;

        match position {
            PositionState::Flat => {
                let Some(lower) = valid(indicators, &self.lower_key, bar_index) else {
                    return Action::Hold;
                };
                if rsi < self.oversold && close <= lower {
                    Action::Buy
                } else {
                    Action::Hold
                }
            }
            PositionState::Long => {
                let Some(upper) = valid(indicators, &self.upper_key, bar_index) else {
                    return Action::Hold;
                };
                if rsi > self.overbought || close >= upper {
                    Action::Sell
                } else {
                    Action::Hold
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn iv_all(rsi: f64, upper: f64, lower: f64) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("rsi_14".to_string(), vec![rsi]);
        iv.insert("bollinger_upper_20_2".to_string(), vec![upper]);
        iv.insert("bollinger_lower_20_2".to_string(), vec![lower]);
        iv
    }

    #[test]
    fn buy_needs_both_conditions() {
        let bars = make_bars(&[88.0]);
        let strat = RsiBollinger::default_params();
        // Oversold and at/below lower band: buy.
        assert_eq!(
            strat.decide(&bars, 0, &iv_all(25.0, 110.0, 90.0), PositionState::Flat),
            Action::Buy
        );
        // Oversold but above lower band: hold.
        assert_eq!(
            strat.decide(&bars, 0, &iv_all(25.0, 110.0, 80.0), PositionState::Flat),
            Action::Hold
        );
        // At lower band but RSI neutral: hold.
        assert_eq!(
            strat.decide(&bars, 0, &iv_all(50.0, 110.0, 90.0), PositionState::Flat),
            Action::Hold
        );
    }

    #[test]
    fn sell_needs_either_condition() {
        let bars = make_bars(&[112.0]);
        let strat = RsiBollinger::default_params();
        // Overbought alone.
        assert_eq!(
            strat.decide(&bars, 0, &iv_all(75.0, 120.0, 90.0), PositionState::Long),
            Action::Sell
        );
        // Upper band alone.
        assert_eq!(
            strat.decide(&bars, 0, &iv_all(50.0, 110.0, 90.0), PositionState::Long),
            Action::Sell
        );
        // Neither.
        assert_eq!(
            strat.decide(&bars, 0, &iv_all(50.0, 120.0, 90.0), PositionState::Long),
            Action::Hold
        );
    }

    #[test]
    fn wires_three_indicators() {
        let strat = RsiBollinger::default_params();
        assert_eq!(strat.indicators().len(), 3);
        assert_eq!(strat.warmup_bars(), 19);
    }
}
