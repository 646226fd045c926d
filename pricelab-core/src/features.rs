//! Feature engine: bar series in, enriched table out.
//!
//! Four derived columns per row, all trailing and right-aligned:
//! - daily return: `PctChange(1)` of close, in percent
//! - MA50 / MA200: simple moving averages of close
//! - volatility: sample stddev of the daily return over 50 rows
//!
//! Rows where any derived column is undefined are dropped, so the first
//! `MIN_HISTORY - 1` rows never reach the output. Windows count rows, not
//! calendar days, and the engine follows row order as given.

use tracing::debug;

use crate::domain::{EnrichedRecord, EnrichedTable, TimeSeriesTable};
use crate::indicators::{Indicator, IndicatorValues, PctChange, Sma, Volatility};

pub const RETURN_PERIOD: usize = 1;
pub const MA_SHORT_WINDOW: usize = 50;
pub const MA_LONG_WINDOW: usize = 200;
pub const VOLATILITY_WINDOW: usize = 50;

/// Rows required before the first fully populated record appears.
pub const MIN_HISTORY: usize = MA_LONG_WINDOW;

/// Derived values for one row before the completeness filter.
///
/// `None` means undefined: warmup, a non-finite input, or a window
/// touching one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRow {
    pub daily_return: Option<f64>,
    pub ma50: Option<f64>,
    pub ma200: Option<f64>,
    pub volatility: Option<f64>,
}

impl FeatureRow {
    fn at(values: &IndicatorValues, names: &FeatureNames, row: usize) -> Self {
        let defined = |name: &str| values.get(name, row).filter(|v| v.is_finite());
        Self {
            daily_return: defined(&names.daily_return),
            ma50: defined(&names.ma50),
            ma200: defined(&names.ma200),
            volatility: defined(&names.volatility),
        }
    }

    /// True when all four derived fields are defined.
    pub fn is_complete(&self) -> bool {
        self.daily_return.is_some()
            && self.ma50.is_some()
            && self.ma200.is_some()
            && self.volatility.is_some()
    }
}

struct FeatureNames {
    daily_return: String,
    ma50: String,
    ma200: String,
    volatility: String,
}

/// Per-row feature values for every input row, before filtering.
pub fn feature_rows(table: &TimeSeriesTable) -> Vec<FeatureRow> {
    let bars = table.bars();

    let daily_return = PctChange::new(RETURN_PERIOD);
    let ma50 = Sma::new(MA_SHORT_WINDOW);
    let ma200 = Sma::new(MA_LONG_WINDOW);
    let volatility = Volatility::new(VOLATILITY_WINDOW);

    let names = FeatureNames {
        daily_return: daily_return.name().to_string(),
        ma50: ma50.name().to_string(),
        ma200: ma200.name().to_string(),
        volatility: volatility.name().to_string(),
    };

    let indicators: [&dyn Indicator; 4] = [&daily_return, &ma50, &ma200, &volatility];
    let mut values = IndicatorValues::new();
    for indicator in indicators {
        values.compute_into(indicator, bars);
    }

    (0..bars.len())
        .map(|row| FeatureRow::at(&values, &names, row))
        .collect()
}

/// Compute all derived features and keep only fully populated rows.
///
/// Pure: no I/O, no hidden state. Output length is `max(0, N - 199)` for
/// well-formed input; tables shorter than `MIN_HISTORY` give an empty result.
pub fn compute_features(table: &TimeSeriesTable) -> EnrichedTable {
    let rows = feature_rows(table);

    let records: Vec<EnrichedRecord> = table
        .bars()
        .iter()
        .zip(rows)
        .filter_map(|(bar, row)| match row {
            FeatureRow {
                daily_return: Some(daily_return),
                ma50: Some(ma50),
                ma200: Some(ma200),
                volatility: Some(volatility),
            } => Some(EnrichedRecord {
                bar: bar.clone(),
                daily_return,
                ma50,
                ma200,
                volatility,
            }),
            _ => None,
        })
        .collect();

    debug!(
        input_rows = table.len(),
        retained_rows = records.len(),
        "feature computation complete"
    );

    EnrichedTable::new(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    fn linear_table(n: usize) -> TimeSeriesTable {
        let closes: Vec<f64> = (0..n).map(|i| 100.0 + i as f64).collect();
        TimeSeriesTable::new(make_bars(&closes))
    }

    #[test]
    fn warmup_boundaries() {
        let rows = feature_rows(&linear_table(210));
        assert!(rows[0].daily_return.is_none());
        assert!(rows[1].daily_return.is_some());
        assert!(rows[48].ma50.is_none());
        assert!(rows[49].ma50.is_some());
        assert!(rows[49].volatility.is_none());
        assert!(rows[50].volatility.is_some());
        assert!(rows[198].ma200.is_none());
        assert!(rows[199].ma200.is_some());
        assert!(!rows[198].is_complete());
        assert!(rows[199].is_complete());
    }

    #[test]
    fn completeness_requires_all_four() {
        let full = FeatureRow {
            daily_return: Some(1.0),
            ma50: Some(1.0),
            ma200: Some(1.0),
            volatility: Some(0.0),
        };
        assert!(full.is_complete());
        assert!(!FeatureRow {
            volatility: None,
            ..full
        }
        .is_complete());
        assert!(!FeatureRow {
            daily_return: None,
            ..full
        }
        .is_complete());
    }

    #[test]
    fn output_starts_at_row_199() {
        let table = linear_table(205);
        let enriched = compute_features(&table);
        assert_eq!(enriched.len(), 6);
        assert_eq!(enriched.records()[0].bar, table.bars()[199]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(compute_features(&TimeSeriesTable::default()).is_empty());
        assert!(feature_rows(&TimeSeriesTable::default()).is_empty());
    }

    #[test]
    fn ma_values_match_window_means() {
        let table = linear_table(200);
        let enriched = compute_features(&table);
        let record = &enriched.records()[0];
        // closes 100..=299; last 50 are 250..=299, all 200 are 100..=299
        assert!((record.ma50 - 274.5).abs() < 1e-9);
        assert!((record.ma200 - 199.5).abs() < 1e-9);
    }
}
