//! Look-ahead contamination tests for every indicator.
//!
//! Invariant: no indicator value at row t may depend on price data from
//! row t+1 or later.
//!
//! Method: compute on a truncated series (rows 0..230) and the full series
//! (rows 0..300) and assert the shared prefix is identical.

use chrono::NaiveDate;
use pricelab_core::domain::{Bar, TimeSeriesTable};
use pricelab_core::features::compute_features;
use pricelab_core::indicators::*;

/// Generate N bars of synthetic OHLCV data with realistic variation.
fn make_test_bars(n: usize) -> Vec<Bar> {
    let base_date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
    let mut bars = Vec::with_capacity(n);
    let mut price = 100.0;

    for i in 0..n {
        // Deterministic pseudo-random walk using a simple LCG
        let seed = (i as u64).wrapping_mul(6364136223846793005).wrapping_add(1);
        let change = ((seed % 200) as f64 - 100.0) * 0.05;
        price += change;
        price = f64::max(price, 10.0);

        let open = price - 0.5;
        let close = price + 0.3;
        bars.push(Bar {
            date: base_date + chrono::Duration::days(i as i64),
            open,
            high: open.max(close) + 2.0,
            low: open.min(close) - 2.0,
            close,
            volume: 1000.0 + i as f64 * 100.0,
        });
    }

    bars
}

fn assert_no_lookahead(indicator: &dyn Indicator, full_bars: &[Bar], truncated_len: usize) {
    let full_result = indicator.compute(full_bars);
    let truncated_result = indicator.compute(&full_bars[..truncated_len]);

    assert_eq!(truncated_result.len(), truncated_len);
    for i in 0..truncated_len {
        let (a, b) = (truncated_result[i], full_result[i]);
        assert!(
            (a.is_nan() && b.is_nan()) || a == b,
            "{}: value at row {i} changed when future rows were added ({a} vs {b})",
            indicator.name()
        );
    }
}

#[test]
fn indicators_do_not_look_ahead() {
    let bars = make_test_bars(300);
    let indicators: Vec<Box<dyn Indicator>> = vec![
        Box::new(PctChange::new(1)),
        Box::new(Sma::new(50)),
        Box::new(Sma::new(200)),
        Box::new(Volatility::new(50)),
    ];
    for indicator in &indicators {
        assert_no_lookahead(indicator.as_ref(), &bars, 230);
    }
}

#[test]
fn enriched_prefix_is_stable() {
    let bars = make_test_bars(300);
    let full = compute_features(&TimeSeriesTable::new(bars.clone()));
    let truncated = compute_features(&TimeSeriesTable::new(bars[..230].to_vec()));

    assert_eq!(truncated.len(), 31);
    assert_eq!(&full.records()[..truncated.len()], truncated.records());
}
