//! Single-signal threshold strategies over auxiliary columns.
//!
//! Each variant reads one precomputed scalar per bar (fear/greed index,
//! put/call ratio, volatility index) and trades against fixed levels. Bars
//! with the column absent are held through.

use super::{Action, Strategy};
use crate::domain::{AuxSignal, Bar, PositionState};
use crate::indicators::IndicatorValues;

/// A one-sided trigger: fire when the signal is above or below a level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    Above(f64),
    Below(f64),
}

impl Trigger {
    pub fn fires(&self, value: f64) -> bool {
        match *self {
            Trigger::Above(level) => value > level,
            Trigger::Below(level) => value < level,
        }
    }
}

/// Contrarian/confirming gate over one auxiliary signal column.
#[derive(Debug, Clone)]
pub struct SentimentGate {
    name: &'static str,
    pub signal: AuxSignal,
    pub buy: Trigger,
    pub sell: Trigger,
}

impl SentimentGate {
    pub fn new(name: &'static str, signal: AuxSignal, buy: Trigger, sell: Trigger) -> Self {
        Self {
            name,
            signal,
            buy,
            sell,
        }
    }

    /// Contrarian fear/greed: buy extreme fear (< 20), exit into greed (> 60).
    pub fn fear_greed() -> Self {
        Self::new(
            "fear_greed_gate",
            AuxSignal::FearGreed,
            Trigger::Below(20.0),
            Trigger::Above(60.0),
        )
    }

    /// Contrarian put/call ratio: buy heavy hedging (> 1.0), exit complacency (< 0.45).
    pub fn put_call() -> Self {
        Self::new(
            "put_call_gate",
            AuxSignal::PutCall,
            Trigger::Above(1.0),
            Trigger::Below(0.45),
        )
    }

    /// Contrarian volatility index: buy panic (> 35), exit calm (< 10).
    pub fn vix() -> Self {
        Self::new(
            "vix_gate",
            AuxSignal::Vix,
            Trigger::Above(35.0),
            Trigger::Below(10.0),
        )
    }
}

impl Strategy for SentimentGate {
    fn name(&self) -> &str {
        self.name
    }

    fn decide(
        &self,
        bars: &[Bar],
        bar_index: usize,
        _indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let Some(value) = bars[bar_index].aux(self.signal) else {
            return Action::Hold;
        };
        match position {
            PositionState::Flat if self.buy.fires(value) => Action::Buy,
            PositionState::Long if self.sell.fires(value) => Action::Sell,
            _ => Action::Hold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn with_fear_greed(value: Option<f64>) -> Vec<Bar> {
        let mut bars = make_bars(&[100.0]);
        bars[0].fear_greed = value;
        bars
    }

    #[test]
    fn trigger_directions() {
        assert!(Trigger::Below(20.0).fires(15.0));
        assert!(!Trigger::Below(20.0).fires(25.0));
        assert!(Trigger::Above(35.0).fires(40.0));
        assert!(!Trigger::Above(35.0).fires(30.0));
    }

    #[test]
    fn fear_greed_buys_extreme_fear() {
        let iv = IndicatorValues::new();
        let strat = SentimentGate::fear_greed();
        let bars = with_fear_greed(Some(15.0));
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Flat), Action::Buy);
    }

    #[test]
    fn fear_greed_sells_into_greed() {
        let iv = IndicatorValues::new();
        let strat = SentimentGate::fear_greed();
        let bars = with_fear_greed(Some(65.0));
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Long), Action::Sell);
    }

    #[test]
    fn holds_on_missing_column() {
        let iv = IndicatorValues::new();
        let strat = SentimentGate::fear_greed();
        let bars = with_fear_greed(None);
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Flat), Action::Hold);
    }

    #[test]
    fn put_call_levels() {
        let iv = IndicatorValues::new();
        let strat = SentimentGate::put_call();
        let mut bars = make_bars(&[100.0]);
        bars[0].put_call = Some(1.2);
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Flat), Action::Buy);
        bars[0].put_call = Some(0.4);
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Long), Action::Sell);
    }

    #[test]
    fn vix_levels() {
        let iv = IndicatorValues::new();
        let strat = SentimentGate::vix();
        let mut bars = make_bars(&[100.0]);
        bars[0].vix = Some(40.0);
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Flat), Action::Buy);
        bars[0].vix = Some(9.0);
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Long), Action::Sell);
        bars[0].vix = Some(20.0);
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Flat), Action::Hold);
    }
}
