//! Broker ledger — cash, the open position, fills, and rejections.
//!
//! Orders are consumed the bar they are submitted; the fill price is the
//! current bar's close (decision on bar t close, filled at bar t close —
//! the documented simplification of this engine). An order that cannot fill
//! cleanly is rejected whole: there are no partial fills and cash never goes
//! negative.

use crate::domain::{
    Bar, ClosedTrade, Fill, OrderSide, Position, PositionState, RejectReason, Rejection,
};

/// Outcome of a single order submission.
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Filled(Fill),
    Rejected(Rejection),
}

impl SubmitOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, SubmitOutcome::Filled(_))
    }
}

/// The simulated broker. One instrument, one open position at a time.
#[derive(Debug)]
pub struct Broker {
    cash: f64,
    position: Option<Position>,
    commission_rate: f64,
    sizer_fraction: f64,
    entry_commission: f64,
    fills: Vec<Fill>,
    trades: Vec<ClosedTrade>,
    rejections: Vec<Rejection>,
}

impl Broker {
    pub fn new(initial_cash: f64, commission_rate: f64, sizer_fraction: f64) -> Self {
        Self {
            cash: initial_cash,
            position: None,
            commission_rate,
            sizer_fraction,
            entry_commission: 0.0,
            fills: Vec::new(),
            trades: Vec::new(),
            rejections: Vec::new(),
        }
    }

    /// Open a long position sized as `sizer_fraction` of current cash.
    ///
    /// Share count is floored to whole shares. Rejects with `ZeroShares` when
    /// the floor lands on zero and with `InsufficientCash` when notional plus
    /// commission would overdraw the ledger.
    pub fn submit_buy(&mut self, bar: &Bar, bar_index: usize) -> SubmitOutcome {
        let price = bar.close;
        let quantity = (self.sizer_fraction * self.cash / price).floor() as i64;
        if quantity == 0 {
            return self.reject(bar, bar_index, OrderSide::Buy, RejectReason::ZeroShares);
        }

        let cost = price * quantity as f64;
        let commission = cost * self.commission_rate;
        if cost + commission > self.cash {
            return self.reject(bar, bar_index, OrderSide::Buy, RejectReason::InsufficientCash);
        }

        self.cash -= cost + commission;
        // The shipped strategies gate on position state, but the ledger does
        // not forbid pyramiding: adding to a position blends the cost basis.
        self.position = Some(match self.position.take() {
            Some(p) => {
                let total = p.quantity + quantity;
                let basis = (p.avg_entry_price * p.quantity as f64 + cost) / total as f64;
                self.entry_commission += commission;
                Position {
                    avg_entry_price: basis,
                    quantity: total,
                    ..p
                }
            }
            None => {
                self.entry_commission = commission;
                Position {
                    symbol: bar.symbol.clone(),
                    quantity,
                    avg_entry_price: price,
                    entry_bar: bar_index,
                    entry_date: bar.date,
                }
            }
        });

        self.fill(bar, bar_index, OrderSide::Buy, price, quantity, cost, commission)
    }

    /// Liquidate the full open position at the current bar's close.
    ///
    /// Rejects with `NoPosition` while flat. A full liquidation also closes
    /// the round trip and records a `ClosedTrade`.
    pub fn submit_sell(&mut self, bar: &Bar, bar_index: usize) -> SubmitOutcome {
        let Some(position) = self.position.take() else {
            return self.reject(bar, bar_index, OrderSide::Sell, RejectReason::NoPosition);
        };

        let price = bar.close;
        let quantity = position.quantity;
        let proceeds = price * quantity as f64;
        let commission = proceeds * self.commission_rate;
        self.cash += proceeds - commission;

        let gross_pnl = (price - position.avg_entry_price) * quantity as f64;
        let total_commission = self.entry_commission + commission;
        self.trades.push(ClosedTrade {
            symbol: position.symbol.clone(),
            entry_bar: position.entry_bar,
            entry_date: position.entry_date,
            entry_price: position.avg_entry_price,
            exit_bar: bar_index,
            exit_date: bar.date,
            exit_price: price,
            quantity,
            gross_pnl,
            commission: total_commission,
            net_pnl: gross_pnl - total_commission,
            bars_held: bar_index.saturating_sub(position.entry_bar),
        });
        self.entry_commission = 0.0;

        self.fill(bar, bar_index, OrderSide::Sell, price, quantity, proceeds, commission)
    }

    /// Total portfolio value with the position marked at `close`.
    pub fn equity(&self, close: f64) -> f64 {
        self.cash + self.position.as_ref().map_or(0.0, |p| p.market_value(close))
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn position(&self) -> Option<&Position> {
        self.position.as_ref()
    }

    pub fn position_state(&self) -> PositionState {
        match &self.position {
            Some(p) if p.quantity > 0 => PositionState::Long,
            _ => PositionState::Flat,
        }
    }

    pub fn fills(&self) -> &[Fill] {
        &self.fills
    }

    pub fn trades(&self) -> &[ClosedTrade] {
        &self.trades
    }

    pub fn rejections(&self) -> &[Rejection] {
        &self.rejections
    }

    pub fn total_commission(&self) -> f64 {
        self.fills.iter().map(|f| f.commission).sum()
    }

    /// Most recent closed trade, if the last submission closed one.
    pub fn last_trade(&self) -> Option<&ClosedTrade> {
        self.trades.last()
    }

    fn fill(
        &mut self,
        bar: &Bar,
        bar_index: usize,
        side: OrderSide,
        price: f64,
        quantity: i64,
        cost: f64,
        commission: f64,
    ) -> SubmitOutcome {
        let fill = Fill {
            bar_index,
            date: bar.date,
            symbol: bar.symbol.clone(),
            side,
            price,
            quantity,
            cost,
            commission,
        };
        self.fills.push(fill.clone());
        SubmitOutcome::Filled(fill)
    }

    fn reject(
        &mut self,
        bar: &Bar,
        bar_index: usize,
        side: OrderSide,
        reason: RejectReason,
    ) -> SubmitOutcome {
        let rejection = Rejection {
            bar_index,
            date: bar.date,
            side,
            reason,
        };
        self.rejections.push(rejection.clone());
        SubmitOutcome::Rejected(rejection)
    }
}
