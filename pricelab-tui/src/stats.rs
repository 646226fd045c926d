//! Histogram binning and Gaussian kernel density estimation.
//!
//! Binning follows the equal-width convention: `bins` intervals spanning
//! `[min, max]`, the last interval closed on the right. A degenerate range
//! (all values equal) widens to `[v - 0.5, v + 0.5]`.

/// Equal-width histogram over finite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite entries of `values`. `None` if there are none or
    /// `bins` is zero.
    pub fn from_values(values: &[f64], bins: usize) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return None;
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if hi - lo <= 0.0 {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }
}

/// Scott's rule bandwidth: sample stddev × n^(-1/5).
///
/// `None` for fewer than two values or zero spread.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let std = var.sqrt();
    if !std.is_finite() || std <= 0.0 {
        return None;
    }
    Some(std * (n as f64).powf(-0.2))
}

/// Gaussian KDE of `values` evaluated at each point of `grid`.
///
/// Returns an empty vector when no bandwidth can be estimated.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Vec<f64> {
    let Some(h) = scott_bandwidth(values) else {
        return Vec::new();
    };
    let norm = 1.0 / (values.len() as f64 * h * (2.0 * std::f64::consts::PI).sqrt());
    grid.iter()
        .map(|&x| {
            values
                .iter()
                .map(|&v| {
                    let z = (x - v) / h;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect()
}

/// `points` evenly spaced values from `lo` to `hi` inclusive.
pub fn linspace(lo: f64, hi: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (points - 1) as f64;
            (0..points).map(|i| lo + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 10.0];
        let h = Histogram::from_values(&values, 5).unwrap();
        // width 2: [0,2) [2,4) [4,6) [6,8) [8,10]
        assert_eq!(h.counts, vec![2, 2, 1, 0, 1]);
        assert_eq!(h.edges.len(), 6);
        assert_eq!(h.bin_width(), 2.0);
        assert_eq!(h.total(), 6);
        assert_eq!(h.max_count(), 2);
    }

    #[test]
    fn histogram_max_lands_in_last_bin() {
        let h = Histogram::from_values(&[0.0, 1.0], 4).unwrap();
        assert_eq!(h.counts, vec![1, 0, 0, 1]);
    }

    #[test]
    fn histogram_constant_values_widen_range() {
        let h = Histogram::from_values(&[0.0, 0.0, 0.0], 2).unwrap();
        assert_eq!(h.range(), (-0.5, 0.5));
        assert_eq!(h.counts, vec![0, 3]);
    }

    #[test]
    fn histogram_skips_non_finite_and_empty() {
        assert!(Histogram::from_values(&[], 10).is_none());
        assert!(Histogram::from_values(&[f64::NAN], 10).is_none());
        assert!(Histogram::from_values(&[1.0], 0).is_none());
        let h = Histogram::from_values(&[1.0, f64::INFINITY, 2.0], 2).unwrap();
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn scott_bandwidth_known_value() {
        // sample std of [1,2,3,4,5] is sqrt(2.5)
        let h = scott_bandwidth(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((h - 2.5_f64.sqrt() * 5.0_f64.powf(-0.2)).abs() < 1e-12);
        assert!(scott_bandwidth(&[3.0, 3.0]).is_none());
        assert!(scott_bandwidth(&[3.0]).is_none());
    }

    #[test]
    fn kde_integrates_to_about_one() {
        let values: Vec<f64> = (0..200).map(|i| ((i * 37) % 101) as f64 / 10.0 - 5.0).collect();
        let grid = linspace(-20.0, 20.0, 2001);
        let density = gaussian_kde(&values, &grid);
        let dx = grid[1] - grid[0];
        let area: f64 = density.iter().sum::<f64>() * dx;
        assert!((area - 1.0).abs() < 1e-3, "area = {area}");
    }

    #[test]
    fn kde_without_spread_is_empty() {
        assert!(gaussian_kde(&[1.0, 1.0, 1.0], &[0.0, 1.0]).is_empty());
    }

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    proptest! {
        #[test]
        fn histogram_total_matches_finite_count(
            values in prop::collection::vec(-50.0..50.0_f64, 1..300),
            bins in 1usize..80,
        ) {
            let h = Histogram::from_values(&values, bins).unwrap();
            prop_assert_eq!(h.total(), values.len());
            prop_assert_eq!(h.counts.len(), bins);
        }
    }
}
