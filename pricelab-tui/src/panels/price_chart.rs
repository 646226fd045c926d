//! Price trend chart - close price against its moving averages
//!
//! Displays:
//! - Close price (primary)
//! - 50-row moving average
//! - 200-row moving average
//! - Date labels at the start, middle and end of the x axis

use pricelab_core::domain::{EnrichedRecord, EnrichedTable};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use super::render_placeholder;
use crate::theme::Theme;

const TITLE: &str = "Price Trend Analysis";

fn points(records: &[EnrichedRecord], value: impl Fn(&EnrichedRecord) -> f64) -> Vec<(f64, f64)> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| (i as f64, value(r)))
        .collect()
}

/// Price trend chart widget
pub struct PriceTrendChart<'a> {
    table: &'a EnrichedTable,
    theme: &'a Theme,
}

impl<'a> PriceTrendChart<'a> {
    pub fn new(table: &'a EnrichedTable, theme: &'a Theme) -> Self {
        Self { table, theme }
    }

    /// (row index, value) points for close, MA50 and MA200.
    fn series(&self) -> [Vec<(f64, f64)>; 3] {
        let records = self.table.records();
        [
            points(records, |r| r.bar.close),
            points(records, |r| r.ma50),
            points(records, |r| r.ma200),
        ]
    }

    fn date_label(&self, index: usize) -> String {
        self.table
            .records()
            .get(index)
            .map(|r| r.date().format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

impl<'a> Widget for PriceTrendChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.table.is_empty() {
            render_placeholder(
                TITLE,
                "No complete rows to plot (need at least 200 rows of history)",
                self.theme,
                area,
                buf,
            );
            return;
        }

        let [close, ma50, ma200] = self.series();

        let x_max = (close.len() - 1) as f64;
        let y_min = close
            .iter()
            .chain(&ma50)
            .chain(&ma200)
            .map(|&(_, v)| v)
            .fold(f64::INFINITY, f64::min);
        let y_max = close
            .iter()
            .chain(&ma50)
            .chain(&ma200)
            .map(|&(_, v)| v)
            .fold(f64::NEG_INFINITY, f64::max);

        // Add padding to Y axis
        let y_range = y_max - y_min;
        let y_pad = if y_range > 0.0 { y_range * 0.05 } else { 1.0 };
        let y_lower = y_min - y_pad;
        let y_upper = y_max + y_pad;
        let y_mid = (y_lower + y_upper) / 2.0;

        let last = close.len() - 1;
        let x_labels = vec![
            Span::raw(self.date_label(0)),
            Span::raw(self.date_label(last / 2)),
            Span::raw(self.date_label(last)),
        ];
        let y_labels = vec![
            Span::raw(format!("{y_lower:.2}")),
            Span::raw(format!("{y_mid:.2}")),
            Span::raw(format!("{y_upper:.2}")),
        ];

        let datasets = vec![
            Dataset::default()
                .name("Close Price")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.close))
                .data(&close),
            Dataset::default()
                .name("50-Day Moving Average")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.ma_short))
                .data(&ma50),
            Dataset::default()
                .name("200-Day Moving Average")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(self.theme.ma_long))
                .data(&ma200),
        ];

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(format!(" {TITLE} "))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(self.theme.muted))
                    .style(Style::default().bg(self.theme.background)),
            )
            .x_axis(
                Axis::default()
                    .title(Span::styled(
                        "Date",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, x_max.max(1.0)])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        "Price",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}
