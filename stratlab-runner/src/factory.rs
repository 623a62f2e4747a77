//! Strategy factory — config enum → boxed strategy trait object.
//!
//! The model-backed variant loads its artifact here, eagerly, so a missing
//! file fails the run before any data is read.

use crate::artifact::{ArtifactError, LinearModel};
use crate::config::StrategyConfig;
use stratlab_core::strategy::{
    BollingerReversion, BuyAndHold, MaCrossover, MaThreshold, ModelSignal, MomentumSma,
    PredictedClose, RocMaCrossover, RocThreshold, RsiBollinger, RsiThreshold, SentimentGate,
    Strategy,
};

/// Build the strategy a config names.
pub fn build_strategy(config: &StrategyConfig) -> Result<Box<dyn Strategy>, ArtifactError> {
    let strategy: Box<dyn Strategy> = match config {
        StrategyConfig::BuyAndHold => Box::new(BuyAndHold::new()),
        StrategyConfig::MaThreshold { period } => Box::new(MaThreshold::new(*period)),
        StrategyConfig::MaCrossover {
            fast_period,
            slow_period,
        } => Box::new(MaCrossover::new(*fast_period, *slow_period)),
        StrategyConfig::BollingerReversion { period, multiplier } => {
            Box::new(BollingerReversion::new(*period, *multiplier))
        }
        StrategyConfig::RsiThreshold {
            period,
            oversold,
            overbought,
        } => Box::new(RsiThreshold::new(*period, *oversold, *overbought)),
        StrategyConfig::RsiBollinger {
            rsi_period,
            bb_period,
            bb_multiplier,
            oversold,
            overbought,
        } => Box::new(RsiBollinger::new(
            *rsi_period,
            *bb_period,
            *bb_multiplier,
            *oversold,
            *overbought,
        )),
        StrategyConfig::RocThreshold { period, threshold } => {
            Box::new(RocThreshold::new(*period, *threshold))
        }
        StrategyConfig::RocMaCrossover {
            roc_period,
            fast_period,
            slow_period,
        } => Box::new(RocMaCrossover::new(*roc_period, *fast_period, *slow_period)),
        StrategyConfig::MomentumSma {
            momentum_period,
            sma_period,
        } => Box::new(MomentumSma::new(*momentum_period, *sma_period)),
        StrategyConfig::FearGreedGate => Box::new(SentimentGate::fear_greed()),
        StrategyConfig::PutCallGate => Box::new(SentimentGate::put_call()),
        StrategyConfig::VixGate => Box::new(SentimentGate::vix()),
        StrategyConfig::PredictedClose => Box::new(PredictedClose::new()),
        StrategyConfig::ModelSignal { artifact } => {
            let model = LinearModel::load(artifact)?;
            Box::new(ModelSignal::new(Box::new(model)))
        }
    };
    Ok(strategy)
}
