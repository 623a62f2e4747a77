//! Model-backed strategy — trades the output of a pretrained classifier.
//!
//! The core treats the model as opaque: anything implementing
//! `PredictiveModel` maps a feature vector to a binary signal (1 = long,
//! 0 = flat). Artifact loading, scaling parameters, and fail-fast existence
//! checks live in the runner; by the time a model reaches this strategy it
//! is ready to predict.

use super::{valid, Action, Strategy};
use crate::domain::{Bar, PositionState};
use crate::indicators::{Bollinger, Indicator, IndicatorValues, Macd, Momentum, Rsi, Sma};

/// A pretrained binary classifier over the per-bar feature vector.
pub trait PredictiveModel: Send + Sync {
    /// Classify a feature vector; 1 = long signal, anything else = exit.
    fn predict(&self, features: &[f64]) -> u8;
}

/// Number of features in the vector passed to `PredictiveModel::predict`.
///
/// Order: close, sma_10, sma_50, momentum_10, rsi_14, macd_12_26,
/// bollinger_middle_20_2, bollinger_upper_20_2, bollinger_lower_20_2.
pub const FEATURE_COUNT: usize = 9;

const FEATURE_KEYS: [&str; FEATURE_COUNT - 1] = [
    "sma_10",
    "sma_50",
    "momentum_10",
    "rsi_14",
    "macd_12_26",
    "bollinger_middle_20_2",
    "bollinger_upper_20_2",
    "bollinger_lower_20_2",
];

/// The indicator set backing the model feature vector.
pub fn feature_indicators() -> Vec<Box<dyn Indicator>> {
    vec![
        Box::new(Sma::new(10)),
        Box::new(Sma::new(50)),
        Box::new(Momentum::new(10)),
        Box::new(Rsi::new(14)),
        Box::new(Macd::new(12, 26)),
        Box::new(Bollinger::middle(20, 2.0)),
        Box::new(Bollinger::upper(20, 2.0)),
        Box::new(Bollinger::lower(20, 2.0)),
    ]
}

/// Strategy driven by a `PredictiveModel`.
pub struct ModelSignal {
    model: Box<dyn PredictiveModel>,
}

impl ModelSignal {
    pub fn new(model: Box<dyn PredictiveModel>) -> Self {
        Self { model }
    }

    /// Assemble the feature vector at `bar_index`; `None` while any feature
    /// is still warming up.
    fn features(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
    ) -> Option<Vec<f64>> {
        let mut features = Vec::with_capacity(FEATURE_COUNT);
        features.push(bars[bar_index].close);
        for key in FEATURE_KEYS {
            features.push(valid(indicators, key, bar_index)?);
        }
        Some(features)
    }
}

impl Strategy for ModelSignal {
    fn name(&self) -> &str {
        "model_signal"
    }

    fn warmup_bars(&self) -> usize {
        // Longest feature lookback: SMA(50).
        49
    }

    fn indicators(&self) -> Vec<Box<dyn Indicator>> {
        feature_indicators()
    }

    fn decide(
        &self,
        bars: &[Bar],
        bar_index: usize,
        indicators: &IndicatorValues,
        position: PositionState,
    ) -> Action {
        let Some(features) = self.features(bars, bar_index, indicators) else {
            return Action::Hold;
        };
        let prediction = self.model.predict(&features);
        match position {
            PositionState::Flat if prediction == 1 => Action::Buy,
            PositionState::Long if prediction == 0 => Action::Sell,
            _ => Action::Hold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    struct Constant(u8);

    impl PredictiveModel for Constant {
        fn predict(&self, features: &[f64]) -> u8 {
            assert_eq!(features.len(), FEATURE_COUNT);
            self.0
        }
    }

    fn full_indicators(n: usize) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        for key in FEATURE_KEYS {
            iv.insert(key.to_string(), vec![1.0; n]);
        }
        iv
    }

    #[test]
    fn long_prediction_buys_when_flat() {
        let bars = make_bars(&[100.0]);
        let strat = ModelSignal::new(Box::new(Constant(1)));
        assert_eq!(
            strat.decide(&bars, 0, &full_indicators(1), PositionState::Flat),
            Action::Buy
        );
        assert_eq!(
            strat.decide(&bars, 0, &full_indicators(1), PositionState::Long),
            Action::Hold
        );
    }

    #[test]
    fn flat_prediction_sells_when_long() {
        let bars = make_bars(&[100.0]);
        let strat = ModelSignal::new(Box::new(Constant(0)));
        assert_eq!(
            strat.decide(&bars, 0, &full_indicators(1), PositionState::Long),
            Action::Sell
        );
        assert_eq!(
            strat.decide(&bars, 0, &full_indicators(1), PositionState::Flat),
            Action::Hold
        );
    }

    #[test]
    fn holds_while_features_warm_up() {
        let bars = make_bars(&[100.0]);
        let strat = ModelSignal::new(Box::new(Constant(1)));
        let mut iv = full_indicators(1);
        iv.insert("sma_50".to_string(), vec![f64::NAN]);
        assert_eq!(strat.decide(&bars, 0, &iv, PositionState::Flat), Action::Hold);
    }

    #[test]
    fn feature_indicator_names_match_keys() {
        let names: Vec<String> = feature_indicators()
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        assert_eq!(names.len(), FEATURE_COUNT - 1);
        for key in FEATURE_KEYS {
            assert!(names.contains(&key.to_string()), "missing indicator for {key}");
        }
    }
}
