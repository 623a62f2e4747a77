//! Strategy decision interface and the shipped strategy variants.
//!
//! A strategy is a pure function of bar history plus a small parameter set.
//! It reads price history, precomputed indicator values, and the current
//! {Flat, Long} position state, and emits at most one intent per bar. It
//! never touches the ledger — the simulation loop translates intents into
//! broker submissions.
//!
//! Every variant shares one state machine: Flat→Long on a buy signal while
//! flat, Long→Flat on a sell signal while long. No short state exists.

pub mod bollinger_reversion;
pub mod buy_hold;
pub mod ma_crossover;
pub mod ma_threshold;
pub mod model;
pub mod momentum;
pub mod predicted;
pub mod roc_ma;
pub mod roc_threshold;
pub mod rsi_bollinger;
pub mod rsi_threshold;
pub mod sentiment;

pub use bollinger_reversion::BollingerReversion;
pub use buy_hold::BuyAndHold;
pub use ma_crossover::MaCrossover;
pub use ma_threshold::MaThreshold;
pub use model::{feature_indicators, ModelSignal, PredictiveModel, FEATURE_COUNT};
pub use momentum::MomentumSma;
pub use predicted::PredictedClose;
pub use roc_ma::RocMaCrossover;
pub use roc_threshold::RocThreshold;
pub use rsi_bollinger::RsiBollinger;
pub use rsi_threshold::RsiThreshold;
pub use sentiment::{SentimentGate, Trigger};

use crate::domain::{Bar, PositionState};
use crate::indicators::{Indicator, IndicatorValues};
use serde::{Deserialize, Serialize};

/// Per-bar intent emitted by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Buy,
    Sell,
    Hold,
}

/// Trait for strategies.
///
/// `decide` must only read `bars[0..=bar_index]` — temporal causality is the
/// engine's one non-negotiable contract.
pub trait Strategy: Send + Sync {
    /// Human-readable name (e.g. "ma_crossover").
    fn name(&self) -> &str;

    /// Bars to skip before the first decision. The engine does not call
    /// `decide` during warmup; equity is still sampled.
    fn warmup_bars(&self) -> usize {
        0
    }

    /// Indicator set the engine precomputes before the loop.
    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        Vec::new()
    }

    /// Evaluate the bar at `bar_index` and emit an intent.
    fn decide(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action;
}

/// Fetch an indicator value, treating warmup NaN and missing series as absent.
pub(crate) fn valid(indicators: &IndicatorValues, key: &str, bar_index: usize) -> Option<f64> {
    indicators
        .get(key, bar_index)
        .filter(|v| !v.is_nan())
}
