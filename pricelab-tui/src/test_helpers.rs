//! Test helpers for creating mock data

use chrono::{Duration, NaiveDate};
use pricelab_core::domain::{Bar, EnrichedRecord, EnrichedTable};
use ratatui::buffer::Buffer;

/// `n` enriched records on consecutive days with a gently oscillating close.
pub fn enriched_table(n: usize) -> EnrichedTable {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let records = (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1;
            EnrichedRecord {
                bar: Bar {
                    date: start + Duration::days(i as i64),
                    open: close - 0.5,
                    high: close + 1.0,
                    low: close - 1.0,
                    close,
                    volume: 10_000.0,
                },
                daily_return: (i as f64 * 0.7).cos() * 1.5,
                ma50: close - 1.0,
                ma200: close - 2.0,
                volatility: 1.2,
            }
        })
        .collect();
    EnrichedTable::new(records)
}

/// All buffer cells concatenated row by row.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut out = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            out.push_str(buf[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}
