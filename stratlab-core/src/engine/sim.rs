//! The simulation loop — replay the feed through a strategy into the broker.
//!
//! Per bar: look up precomputed indicator values, ask the strategy for an
//! intent, translate Buy/Sell into a broker submission, log the outcome, and
//! append an equity sample using post-fill cash with the position marked at
//! the current bar's close. Deterministic given identical inputs.

use crate::data::BarFeed;
use crate::domain::{equity_values, ClosedTrade, EquityPoint, Fill, OrderSide, Rejection};
use crate::engine::broker::{Broker, SubmitOutcome};
use crate::engine::logger::RunLogger;
use crate::indicators::IndicatorValues;
use crate::strategy::{Action, Strategy};
use serde::{Deserialize, Serialize};

/// Engine construction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub initial_cash: f64,
    pub commission_rate: f64,
    /// Fraction of cash deployed per buy.
    pub sizer_fraction: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_cash: 1_000_000.0,
            commission_rate: 0.001425,
            sizer_fraction: 0.95,
        }
    }
}

/// Everything a completed run produces. Metrics are computed downstream from
/// the equity curve and trade list; the engine never returns partial output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOutput {
    pub symbol: String,
    pub strategy: String,
    pub initial_cash: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub fills: Vec<Fill>,
    pub trades: Vec<ClosedTrade>,
    pub rejections: Vec<Rejection>,
}

impl RunOutput {
    pub fn final_equity(&self) -> f64 {
        self.equity_curve
            .last()
            .map_or(self.initial_cash, |p| p.equity)
    }

    pub fn equity_values(&self) -> Vec<f64> {
        equity_values(&self.equity_curve)
    }
}

/// Run a backtest over one feed.
///
/// Indicators are computed exactly once before the loop; decisions start
/// after the strategy's warmup, equity is sampled from bar zero.
pub fn run_backtest(
    feed: &BarFeed,
    strategy: &dyn Strategy,
    config: &EngineConfig,
    logger: &mut RunLogger,
) -> RunOutput {
    let bars = feed.bars();
    let indicators = IndicatorValues::precompute(&strategy.indicators(), bars);
    let mut broker = Broker::new(
        config.initial_cash,
        config.commission_rate,
        config.sizer_fraction,
    );
    let warmup = strategy.warmup_bars();

    logger.note(format!(
        "--- backtest start: {} on {} ({} bars, cash {:.2}) ---",
        strategy.name(),
        feed.symbol(),
        bars.len(),
        config.initial_cash,
    ));

    let mut equity_curve = Vec::with_capacity(bars.len());

    for (t, bar) in bars.iter().enumerate() {
        if t >= warmup {
            let action = strategy.decide(bars, t, &indicators, broker.position_state());
            match action {
                Action::Buy => {
                    let outcome = broker.submit_buy(bar, t);
                    log_outcome(logger, &outcome, &broker);
                }
                Action::Sell => {
                    let outcome = broker.submit_sell(bar, t);
                    log_outcome(logger, &outcome, &broker);
                }
                Action::Hold => {}
            }
        }

        equity_curve.push(EquityPoint {
            date: bar.date,
            equity: broker.equity(bar.close),
            cash: broker.cash(),
        });
    }

    logger.note(format!(
        "--- backtest end: equity {:.2}, {} trades, {} rejections ---",
        equity_curve.last().map_or(config.initial_cash, |p| p.equity),
        broker.trades().len(),
        broker.rejections().len(),
    ));

    RunOutput {
        symbol: feed.symbol().to_string(),
        strategy: strategy.name().to_string(),
        initial_cash: config.initial_cash,
        equity_curve,
        fills: broker.fills().to_vec(),
        trades: broker.trades().to_vec(),
        rejections: broker.rejections().to_vec(),
    }
}

fn log_outcome(logger: &mut RunLogger, outcome: &SubmitOutcome, broker: &Broker) {
    match outcome {
        SubmitOutcome::Filled(fill) => {
            let label = match fill.side {
                OrderSide::Buy => "BUY",
                OrderSide::Sell => "SELL",
            };
            logger.log(
                fill.date,
                format!(
                    "[{label}] EXECUTED at Price: {:<10.2} | Total Cost: {:<10.2} | Commission: {:<10.2}",
                    fill.price, fill.cost, fill.commission
                ),
            );
            if fill.side == OrderSide::Sell {
                if let Some(trade) = broker.last_trade() {
                    logger.log(
                        fill.date,
                        format!(
                            "[OPERATION PROFIT] Gross: {:<10.2} | Net: {:<10.2}",
                            trade.gross_pnl, trade.net_pnl
                        ),
                    );
                }
            }
        }
        SubmitOutcome::Rejected(rejection) => {
            logger.log(
                rejection.date,
                format!(
                    "[{:?}] order rejected: {}",
                    rejection.side,
                    rejection.reason.as_str()
                ),
            );
        }
    }
}
