//! Multi-instrument runs.
//!
//! Alignment is best-effort: every instrument is replayed on its own feed
//! (independent ledger funded with an equal share of starting cash), and the
//! combined equity curve is assembled on the union calendar, carrying each
//! instrument's last known value across dates it has no bar for. No strict
//! date intersection is enforced.

use crate::data::{align_union, BarFeed};
use crate::domain::EquityPoint;
use crate::engine::logger::RunLogger;
use crate::engine::sim::{run_backtest, EngineConfig, RunOutput};
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};

/// Result of a multi-instrument run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiRunOutput {
    pub per_symbol: Vec<RunOutput>,
    /// Summed equity across instruments on the union calendar.
    pub combined_curve: Vec<EquityPoint>,
}

/// Run one strategy independently over several feeds.
///
/// Starting cash is split equally across instruments (simple equal sizing);
/// each instrument gets its own broker, so a rejection or trade on one never
/// disturbs another.
pub fn run_multi_backtest(
    feeds: &[BarFeed],
    strategy: &dyn Strategy,
    config: &EngineConfig,
    logger: &mut RunLogger,
) -> MultiRunOutput {
    let per_instrument_cash = if feeds.is_empty() {
        config.initial_cash
    } else {
        config.initial_cash / feeds.len() as f64
    };
    let sub_config = EngineConfig {
        initial_cash: per_instrument_cash,
        ..config.clone()
    };

    let per_symbol: Vec<RunOutput> = feeds
        .iter()
        .map(|feed| run_backtest(feed, strategy, &sub_config, logger))
        .collect();

    let aligned = align_union(feeds);
    let mut combined_curve = Vec::with_capacity(aligned.dates.len());

    // Per-symbol cursor into its equity curve; before an instrument's first
    // bar its share of cash counts at face value.
    let mut cursors = vec![0usize; per_symbol.len()];
    let mut last_points: Vec<EquityPoint> = per_symbol
        .iter()
        .map(|_| EquityPoint {
            date: aligned.dates.first().copied().unwrap_or_default(),
            equity: per_instrument_cash,
            cash: per_instrument_cash,
        })
        .collect();

    for &date in &aligned.dates {
        for (i, output) in per_symbol.iter().enumerate() {
            while cursors[i] < output.equity_curve.len()
                && output.equity_curve[cursors[i]].date <= date
            {
                last_points[i] = output.equity_curve[cursors[i]];
                cursors[i] += 1;
            }
        }
        combined_curve.push(EquityPoint {
            date,
            equity: last_points.iter().map(|p| p.equity).sum(),
            cash: last_points.iter().map(|p| p.cash).sum(),
        });
    }

    MultiRunOutput {
        per_symbol,
        combined_curve,
    }
}
