//! Order intents and rejection reasons.
//!
//! Orders here are short-lived: created from a strategy decision, consumed by
//! the broker within the same bar, then discarded. There is no pending-order
//! queue; the only terminal states are Filled and Rejected.

use serde::{Deserialize, Serialize};

/// Direction of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    /// Open a long position, sized as a fraction of current cash.
    Buy,
    /// Liquidate the full open position.
    Sell,
}

/// Why the broker refused an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    /// Fraction-of-equity sizing floored to zero shares.
    ZeroShares,
    /// Share cost plus commission exceeds available cash.
    InsufficientCash,
    /// Sell submitted while flat.
    NoPosition,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::ZeroShares => "zero shares",
            RejectReason::InsufficientCash => "insufficient cash",
            RejectReason::NoPosition => "no open position",
        }
    }
}

/// A rejected order, recorded for the run log and diagnostics.
///
/// Rejections are non-fatal: the ledger is untouched and the simulation
/// proceeds to the next bar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rejection {
    pub bar_index: usize,
    pub date: chrono::NaiveDate,
    pub side: OrderSide,
    pub reason: RejectReason,
}
