//! Equity curve samples.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One equity-curve sample: post-fill cash and the position marked at the
/// bar's close. Appended once per simulated bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
    pub cash: f64,
}

/// Extract the equity column from a curve.
pub fn equity_values(curve: &[EquityPoint]) -> Vec<f64> {
    curve.iter().map(|p| p.equity).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equity_values_extracts_column() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let curve = vec![
            EquityPoint { date, equity: 100_000.0, cash: 100_000.0 },
            EquityPoint { date, equity: 101_000.0, cash: 5_000.0 },
        ];
        assert_eq!(equity_values(&curve), vec![100_000.0, 101_000.0]);
    }
}
