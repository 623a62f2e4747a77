//! Predicted-close strategy — trades the sign of a model's price forecast.
//!
//! The forecast arrives as a precomputed per-bar column (an upstream
//! sequence model's output); this strategy only compares it to the close.

use super::{Action, Strategy};
use crate::domain::{AuxSignal, Bar, PositionState};
use crate::indicators::IndicatorValues;

/// Buys when the predicted close exceeds the actual close, exits when the
/// forecast drops below it.
#[derive(Debug, Clone, Default)]
pub struct PredictedClose;

impl PredictedClose {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for PredictedClose {
    fn name(&self) -> &str {
        "predicted_close"
    }

    fn decide(
        &self,
        bars: &[Bar],
        bar_index: usize,
        _indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let bar = &bars[bar_index];
        let Some(predicted) = bar.aux(AuxSignal::PredictedClose) else {
            return Action::Hold;
        };
        match position {
            PositionState::Flat if predicted > bar.close => Action::Buy,
            PositionState::Long if predicted < bar.close => Action::Sell,
            _ => Action::Hold,
        }
    }
}
