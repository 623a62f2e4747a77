//! Momentum — lookback difference (not percentage).
//!
//! momentum[t] = close[t] - close[t-period].

use super::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
    name: String,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "Momentum period must be >= 1");
        Self {
            period,
            name: format!("momentum_{period}"),
        }
    }
}

impl Indicator for Momentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        for i in self.period..n {
            result[i] = bars[i].close - bars[i - self.period].close;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn momentum_basic() {
        let bars = make_bars(&[100.0, 102.0, 101.0, 105.0]);
        let result = Momentum::new(2).compute(&bars);
        assert!(result[1].is_nan());
        assert_approx(result[2], 1.0, DEFAULT_EPSILON);
        assert_approx(result[3], 3.0, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_flat_series_is_zero() {
        let bars = make_bars(&[100.0; 5]);
        let result = Momentum::new(2).compute(&bars);
        assert_approx(result[4], 0.0, DEFAULT_EPSILON);
    }

    #[test]
    fn momentum_lookback() {
        assert_eq!(Momentum::new(14).lookback(), 14);
    }
}
