//! Canonical ordering and anomaly detection for loaded bars.

use crate::domain::{Bar, TimeSeriesTable};

/// Canonicalizer for bar data
pub struct Canonicalizer;

/// Outcome of canonicalization.
#[derive(Debug)]
pub struct Canonicalized {
    pub table: TimeSeriesTable,
    /// Input was not already in ascending date order.
    pub reordered: bool,
    /// Rows removed because an earlier row had the same date.
    pub duplicates_dropped: usize,
}

impl Canonicalizer {
    /// Sort ascending by date and drop duplicate dates.
    ///
    /// The sort is stable, so among rows sharing a date the first one in
    /// file order is kept.
    pub fn canonicalize(mut bars: Vec<Bar>) -> Canonicalized {
        let reordered = bars.windows(2).any(|w| w[0].date > w[1].date);
        if reordered {
            bars.sort_by_key(|b| b.date);
        }

        let before = bars.len();
        bars.dedup_by_key(|b| b.date);
        let duplicates_dropped = before - bars.len();

        Canonicalized {
            table: TimeSeriesTable::new(bars),
            reordered,
            duplicates_dropped,
        }
    }

    /// Detect suspicious rows. Anomalies are reported, never removed.
    pub fn detect_anomalies(table: &TimeSeriesTable) -> Vec<AnomalyReport> {
        let bars = table.bars();
        let checks = [
            (
                AnomalyType::ZeroVolume,
                Severity::Warning,
                bars.iter().filter(|b| b.volume == 0.0).count(),
            ),
            (
                AnomalyType::NonPositiveClose,
                Severity::Warning,
                bars.iter().filter(|b| b.close <= 0.0).count(),
            ),
            (
                AnomalyType::InconsistentRange,
                Severity::Info,
                bars.iter()
                    .filter(|b| b.close > 0.0 && !b.is_void() && !b.is_sane())
                    .count(),
            ),
        ];

        checks
            .into_iter()
            .filter(|(_, _, count)| *count > 0)
            .map(|(anomaly_type, severity, count)| AnomalyReport {
                anomaly_type,
                count,
                severity,
            })
            .collect()
    }
}

#[derive(Debug)]
pub struct AnomalyReport {
    pub anomaly_type: AnomalyType,
    pub count: usize,
    pub severity: Severity,
}

#[derive(Debug, PartialEq)]
pub enum AnomalyType {
    ZeroVolume,
    /// Close at or below zero; the following daily return is undefined.
    NonPositiveClose,
    /// OHLC envelope violated (e.g. high below low).
    InconsistentRange,
}

#[derive(Debug, PartialEq)]
pub enum Severity {
    Info,
    Warning,
}
