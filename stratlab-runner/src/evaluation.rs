//! Qualitative evaluation — plain-language classification of run metrics.
//!
//! Pure function over an already-computed `Metrics`; the sentences go to the
//! run log and the markdown report. Sharpe bands check the stricter
//! threshold first, so an excellent run is reported as excellent rather
//! than merely good.

use crate::metrics::Metrics;

/// Drawdown above this fraction is flagged as high risk.
pub const DRAWDOWN_ALERT: f64 = 0.20;

/// Classify a run's metrics into human-readable sentences.
pub fn evaluate(metrics: &Metrics) -> Vec<String> {
    let mut lines = Vec::with_capacity(3);

    if metrics.total_return > 0.0 {
        lines.push("Total return is positive, indicating a profitable strategy.".to_string());
    } else if metrics.total_return < 0.0 {
        lines.push("Total return is negative, indicating a loss.".to_string());
    } else {
        lines.push("Total return is flat: the strategy neither made nor lost money.".to_string());
    }

    match metrics.sharpe {
        Some(sharpe) if sharpe > 2.0 => {
            lines.push("Excellent risk-adjusted returns (Sharpe ratio > 2).".to_string());
        }
        Some(sharpe) if sharpe > 1.0 => {
            lines.push(
                "Good risk-adjusted returns (Sharpe ratio > 1), indicating a potentially effective strategy."
                    .to_string(),
            );
        }
        Some(_) => {
            lines.push(
                "Low risk-adjusted returns, suggesting that risk might not be well compensated."
                    .to_string(),
            );
        }
        None => {
            lines.push(
                "Sharpe ratio unavailable: too few return observations or zero variance."
                    .to_string(),
            );
        }
    }

    if metrics.max_drawdown > DRAWDOWN_ALERT {
        lines.push(
            "High maximum drawdown (> 20%), which may indicate high risk.".to_string(),
        );
    } else {
        lines.push(
            "Max drawdown is within acceptable limits (< 20%), suggesting a stable strategy."
                .to_string(),
        );
    }

    lines
}
