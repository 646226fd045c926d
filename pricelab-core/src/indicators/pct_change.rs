//! Percent change of close prices.
//!
//! PCT[t] = (close[t] / close[t-period] - 1) * 100
//! Lookback: period.

use super::indicator::Indicator;
use crate::domain::Bar;

#[derive(Debug, Clone)]
pub struct PctChange {
    period: usize,
    name: String,
}

impl PctChange {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "PctChange period must be >= 1");
        Self {
            period,
            name: format!("pct_change_{period}"),
        }
    }
}

impl Indicator for PctChange {
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
            let prev = bars[i - self.period].close;
            let curr = bars[i].close;
            if prev.is_nan() || curr.is_nan() || prev == 0.0 {
                continue;
            }
            let change = (curr / prev - 1.0) * 100.0;
            if change.is_finite() {
                result[i] = change;
            }
        }

        result
    }
}
