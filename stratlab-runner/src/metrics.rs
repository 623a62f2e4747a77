//! Performance metrics — pure functions over the recorded equity curve.
//!
//! Metrics are computed once at run end, from the full curve and trade list.
//! Either the whole run completes and a `Metrics` is produced, or the run
//! errors and nothing is — there are no partial metrics.

use serde::{Deserialize, Serialize};
use stratlab_core::domain::ClosedTrade;

/// Trading sessions per year used for annualization.
pub const SESSIONS_PER_YEAR: f64 = 252.0;

/// Standard deviation below this counts as zero variance.
const ZERO_VARIANCE_EPSILON: f64 = 1e-12;

/// Aggregate performance snapshot for one backtest run.
///
/// Return figures are fractions (0.10 = 10%); `max_drawdown` is a positive
/// fraction. `sharpe` is `None` when the return series has fewer than two
/// observations or zero variance — never a crash, never a fake zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metrics {
    pub ending_value: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    pub sharpe: Option<f64>,
    pub max_drawdown: f64,
    pub trade_count: usize,
    pub total_commission: f64,
}

impl Metrics {
    /// Compute all metrics from the per-bar equity samples.
    ///
    /// `equity` holds one post-fill sample per bar; the pre-run value
    /// (`initial_cash`) is prepended internally so a one-bar run already has
    /// one return observation.
    pub fn compute(initial_cash: f64, equity: &[f64], trades: &[ClosedTrade]) -> Self {
        let mut curve = Vec::with_capacity(equity.len() + 1);
        curve.push(initial_cash);
        curve.extend_from_slice(equity);

        let ending_value = *curve.last().unwrap_or(&initial_cash);
        let total_return = if initial_cash > 0.0 {
            ending_value / initial_cash - 1.0
        } else {
            0.0
        };

        Self {
            ending_value,
            total_return,
            annualized_return: annualized_return(total_return, equity.len()),
            sharpe: sharpe_ratio(&curve),
            max_drawdown: max_drawdown(&curve),
            trade_count: trades.len(),
            total_commission: trades.iter().map(|t| t.commission).sum(),
        }
    }
}

/// Compound the total return to a yearly rate over `bars` observed sessions.
pub fn annualized_return(total_return: f64, bars: usize) -> f64 {
    if bars == 0 || total_return <= -1.0 {
        return 0.0;
    }
    (1.0 + total_return).powf(SESSIONS_PER_YEAR / bars as f64) - 1.0
}

/// Annualized Sharpe ratio over bar-to-bar returns.
///
/// `None` when fewer than two return observations exist or the return
/// standard deviation is (numerically) zero.
pub fn sharpe_ratio(curve: &[f64]) -> Option<f64> {
    let returns = bar_returns(curve);
    if returns.len() < 2 {
        return None;
    }
    let mean = mean(&returns);
    let std = std_dev(&returns);
    if std < ZERO_VARIANCE_EPSILON {
        return None;
    }
    Some(mean / std * SESSIONS_PER_YEAR.sqrt())
}

/// Maximum peak-to-trough decline as a positive fraction.
pub fn max_drawdown(curve: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;
    for &value in curve {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Bar-to-bar fractional returns.
pub fn bar_returns(curve: &[f64]) -> Vec<f64> {
    curve
        .windows(2)
        .map(|w| if w[0] > 0.0 { (w[1] - w[0]) / w[0] } else { 0.0 })
        .collect()
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
