//! Rolling volatility - sample standard deviation of daily percent returns.
//!
//! Returns come from `PctChange(1)`, so the first return is at index 1 and
//! the first full window of `period` returns ends at index `period`.
//! Uses sample stddev (divide by N - 1).

use super::indicator::Indicator;
use super::pct_change::PctChange;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct Volatility {
    period: usize,
    returns: PctChange,
    name: String,
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        assert!(period >= 2, "Volatility period must be >= 2");
        Self {
            period,
            returns: PctChange::new(1),
            name: format!("volatility_{period}"),
        }
    }
}

impl Indicator for Volatility {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.returns.lookback() + self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        rolling_sample_std(&self.returns.compute(bars), self.period)
    }
}

/// Trailing sample standard deviation (ddof = 1) over `window` values.
///
/// A window holding any non-finite value yields NaN.
pub fn rolling_sample_std(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if window < 2 || n < window {
        return result;
    }

    for i in (window - 1)..n {
        let slice = &values[(i + 1 - window)..=i];
        if slice.iter().any(|v| !v.is_finite()) {
            continue;
        }
        let mean = slice.iter().sum::<f64>() / window as f64;
        let variance = slice
            .iter()
            .map(|v| {
                let diff = v - mean;
                diff * diff
            })
            .sum::<f64>()
            / (window - 1) as f64;
        result[i] = variance.sqrt();
    }

    result
}
