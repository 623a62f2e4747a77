//! Buy-and-hold — enter once, never exit.

use super::{Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::IndicatorValues;

/// Buys on the first bar it sees while flat and holds indefinitely.
#[derive(Debug, Clone, Default)]
pub struct BuyAndHold;

impl BuyAndHold {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for BuyAndHold {
    fn name(&self) -> &str {
        "buy_and_hold"
    }

    fn decide(
        &self,
        _bars: &[Bar],
        _bar_index: usize,
        _indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        if position.is_flat() {
            Action::Buy
        } else {
            Action::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn buys_when_flat_holds_when_long() {
        let bars = make_bars(&[100.0, 101.0]);
        let iv = IndicatorValues::new();
        let strat = BuyAndHold::new();
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Flat), Action::Buy);
        assert_eq!(strat.decide(&bars, 1, &iv, PositionState::Long), Action::Hold);
    }

    #[test]
    fn no_warmup_no_indicators() {
        let strat = BuyAndHold::new();
        assert_eq!(strat.warmup_bars(), 0);
        assert!(strat.indicators().is_empty());
    }
}
