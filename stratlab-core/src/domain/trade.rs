//! ClosedTrade — a completed round-trip: entry fill → exit fill.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed round-trip trade. Built when a position fully liquidates;
/// immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClosedTrade {
    pub symbol: String,

    pub entry_bar: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,

    pub exit_bar: usize,
    pub exit_date: NaiveDate,
    pub exit_price: f64,

    pub quantity: i64,

    /// P&L before commissions: (exit - entry) * quantity.
    pub gross_pnl: f64,
    /// Entry commission + exit commission.
    pub commission: f64,
    /// Gross P&L minus total commission.
    pub net_pnl: f64,

    pub bars_held: usize,
}

impl ClosedTrade {
    /// Return on the trade as a fraction of entry cost.
    pub fn return_pct(&self) -> f64 {
        if self.entry_price == 0.0 || self.quantity == 0 {
            return 0.0;
        }
        self.net_pnl / (self.entry_price * self.quantity as f64)
    }

    pub fn is_winner(&self) -> bool {
        self.net_pnl > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_trade() -> ClosedTrade {
        ClosedTrade {
            symbol: "AAPL".into(),
            entry_bar: 4,
            entry_date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            entry_price: 100.0,
            exit_bar: 8,
            exit_date: NaiveDate::from_ymd_opt(2024, 1, 11).unwrap(),
            exit_price: 110.0,
            quantity: 50,
            gross_pnl: 500.0,
            commission: 15.0,
            net_pnl: 485.0,
            bars_held: 4,
        }
    }

    #[test]
    fn return_pct_calculation() {
        let trade = sample_trade();
        let expected = 485.0 / (100.0 * 50.0);
        assert!((trade.return_pct() - expected).abs() < 1e-10);
    }

    #[test]
    fn is_winner() {
        assert!(sample_trade().is_winner());
        let mut loser = sample_trade();
        loser.net_pnl = -20.0;
        assert!(!loser.is_winner());
    }

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = sample_trade();
        let json = serde_json::to_string(&trade).unwrap();
        let deser: ClosedTrade = serde_json::from_str(&json).unwrap();
        assert_eq!(trade.symbol, deser.symbol);
        assert_eq!(trade.net_pnl, deser.net_pnl);
        assert_eq!(trade.bars_held, deser.bars_held);
    }
}
