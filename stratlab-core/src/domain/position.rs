//! Position — open share count and cost basis, owned by the broker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An open position. Quantity is whole shares, signed; the shipped strategies
/// are long-only so it stays >= 0 in practice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub symbol: String,
    pub quantity: i64,
    pub avg_entry_price: f64,
    pub entry_bar: usize,
    pub entry_date: NaiveDate,
}

impl Position {
    pub fn market_value(&self, current_price: f64) -> f64 {
        self.quantity as f64 * current_price
    }

    pub fn unrealized_pnl(&self, current_price: f64) -> f64 {
        self.quantity as f64 * (current_price - self.avg_entry_price)
    }
}

/// Position state as seen by a strategy: the {Flat, Long} machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionState {
    Flat,
    Long,
}

impl PositionState {
    pub fn is_flat(&self) -> bool {
        matches!(self, PositionState::Flat)
    }

    pub fn is_long(&self) -> bool {
        matches!(self, PositionState::Long)
    }
}
