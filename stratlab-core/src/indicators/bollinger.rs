//! Bollinger Bands — SMA +/- standard deviation multiplier.
//!
//! Three bands as separate Indicator instances sharing one implementation:
//! middle = SMA(close, period), upper/lower = middle ± mult * stddev.
//! Population standard deviation (divide by N), computed with rolling sums.

use super::Indicator;
use crate::domain::Bar;

/// Which band to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    period: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(period: usize, multiplier: f64) -> Self {
        Self::band(period, multiplier, BollingerBand::Upper)
    }

    pub fn middle(period: usize, multiplier: f64) -> Self {
        Self::band(period, multiplier, BollingerBand::Middle)
    }

    pub fn lower(period: usize, multiplier: f64) -> Self {
        Self::band(period, multiplier, BollingerBand::Lower)
    }

    fn band(period: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(period >= 1, "Bollinger period must be >= 1");
        assert!(
            multiplier > 0.0 && multiplier.is_finite(),
            "Bollinger multiplier must be positive and finite"
        );
        let suffix = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
        };
        Self {
            period,
            multiplier,
            band,
            name: format!("bollinger_{suffix}_{period}_{multiplier}"),
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];
        if n < self.period {
            return result;
        }

        let p = self.period as f64;
        let mut sum: f64 = bars.iter().take(self.period).map(|b| b.close).sum();
        let mut sum_sq: f64 = bars.iter().take(self.period).map(|b| b.close * b.close).sum();

        for i in (self.period - 1)..n {
            if i >= self.period {
                let leaving = bars[i - self.period].close;
                let entering = bars[i].close;
                sum += entering - leaving;
                sum_sq += entering * entering - leaving * leaving;
            }
            let mean = sum / p;
            result[i] = match self.band {
                BollingerBand::Middle => mean,
                BollingerBand::Upper | BollingerBand::Lower => {
                    // Clamp: rolling-sum cancellation can drive tiny variances
                    // slightly negative.
                    let variance = (sum_sq / p - mean * mean).max(0.0);
                    let offset = self.multiplier * variance.sqrt();
                    match self.band {
                        BollingerBand::Upper => mean + offset,
                        _ => mean - offset,
                    }
                }
            };
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars};

    #[test]
    fn bands_on_constant_series_collapse_to_mean() {
        let bars = make_bars(&[100.0; 25]);
        let upper = Bollinger::upper(20, 2.0).compute(&bars);
        let middle = Bollinger::middle(20, 2.0).compute(&bars);
        let lower = Bollinger::lower(20, 2.0).compute(&bars);
        assert_approx(upper[24], 100.0, 1e-8);
        assert_approx(middle[24], 100.0, 1e-8);
        assert_approx(lower[24], 100.0, 1e-8);
    }

    #[test]
    fn band_ordering() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + (i % 5) as f64).collect();
        let bars = make_bars(&closes);
        let upper = Bollinger::upper(20, 2.0).compute(&bars);
        let middle = Bollinger::middle(20, 2.0).compute(&bars);
        let lower = Bollinger::lower(20, 2.0).compute(&bars);
        for i in 19..30 {
            assert!(upper[i] > middle[i], "upper <= middle at {i}");
            assert!(middle[i] > lower[i], "middle <= lower at {i}");
        }
    }

    #[test]
    fn known_window() {
        // Window [10, 20]: mean 15, population stddev 5.
        let bars = make_bars(&[10.0, 20.0]);
        let upper = Bollinger::upper(2, 2.0).compute(&bars);
        let lower = Bollinger::lower(2, 2.0).compute(&bars);
        assert_approx(upper[1], 25.0, 1e-8);
        assert_approx(lower[1], 5.0, 1e-8);
    }

    #[test]
    fn warmup_prefix() {
        let bars = make_bars(&[100.0; 25]);
        let upper = Bollinger::upper(20, 2.0).compute(&bars);
        for i in 0..19 {
            assert!(upper[i].is_nan(), "expected NaN at {i}");
        }
        assert!(!upper[19].is_nan());
    }

    #[test]
    fn band_names() {
        assert_eq!(Bollinger::upper(20, 2.0).name(), "bollinger_upper_20_2");
        assert_eq!(Bollinger::lower(20, 2.0).name(), "bollinger_lower_20_2");
        assert_eq!(Bollinger::middle(20, 2.0).name(), "bollinger_middle_20_2");
    }

    #[test]
    #[should_panic(expected = "Bollinger multiplier must be positive and finite")]
    fn rejects_negative_multiplier() {
        Bollinger::upper(20, -1.0);
    }
}
