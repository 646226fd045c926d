//! Indicator trait and precomputed indicator values container.
//!
//! Indicators are pure functions: bar history in, numeric series out.
//! Undefined values are `f64::NAN`.

use crate::domain::Bar;
use std::collections::HashMap;

/// Trait for indicators.
///
/// Indicators take a full bar series and produce a numeric output series of
/// the same length. The first `lookback()` values are `f64::NAN` (warmup).
///
/// # Look-ahead contamination guard
/// No indicator value at row t may depend on price data from row t+1 or later.
pub trait Indicator: Send + Sync {
    /// Column-style name (e.g., "sma_50", "volatility_50").
    fn name(&self) -> &str;

    /// Number of leading rows that are always undefined.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;
}

/// Container for precomputed indicator series, keyed by indicator name.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute `indicator` over `bars` and store it under its own name.
    pub fn compute_into(&mut self, indicator: &dyn Indicator, bars: &[Bar]) {
        self.insert(indicator.name(), indicator.compute(bars));
    }

    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Value at a row index. `None` if the series or the row is missing.
    pub fn get(&self, name: &str, row: usize) -> Option<f64> {
        self.series.get(name).and_then(|v| v.get(row).copied())
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
