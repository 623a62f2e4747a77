//! Fill records emitted by the broker.

use super::order::OrderSide;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An executed order. Immutable once emitted.
///
/// `cost` is the gross notional (`price * quantity`); `commission` is charged
/// on top of it for buys and deducted from proceeds for sells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub symbol: String,
    pub side: OrderSide,
    pub price: f64,
    pub quantity: i64,
    pub cost: f64,
    pub commission: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_serialization_roundtrip() {
        let fill = Fill {
            bar_index: 3,
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            symbol: "AAPL".into(),
            side: OrderSide::Buy,
            price: 185.5,
            quantity: 512,
            cost: 94_976.0,
            commission: 135.34,
        };
        let json = serde_json::to_string(&fill).unwrap();
        let deser: Fill = serde_json::from_str(&json).unwrap();
        assert_eq!(fill.quantity, deser.quantity);
        assert_eq!(fill.price, deser.price);
        assert_eq!(fill.side, deser.side);
    }
}
