//! Return distribution - histogram of daily returns with a density overlay
//!
//! Bars show the count per bin; the overlay is a Gaussian KDE scaled to the
//! same count units (density × n × bin width) so both share the y axis.

use pricelab_core::domain::EnrichedTable;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};

use super::render_placeholder;
use crate::stats::{gaussian_kde, linspace, Histogram};
use crate::theme::Theme;

pub const HISTOGRAM_BINS: usize = 50;

const TITLE: &str = "Volatility (Distribution of Daily Returns)";
const DENSITY_POINTS: usize = 200;

/// Return histogram widget
pub struct ReturnHistogram<'a> {
    table: &'a EnrichedTable,
    theme: &'a Theme,
}

impl<'a> ReturnHistogram<'a> {
    pub fn new(table: &'a EnrichedTable, theme: &'a Theme) -> Self {
        Self { table, theme }
    }
}

impl<'a> Widget for ReturnHistogram<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let returns = self.table.returns();
        let Some(histogram) = Histogram::from_values(&returns, HISTOGRAM_BINS) else {
            render_placeholder(TITLE, "No daily returns to plot", self.theme, area, buf);
            return;
        };

        let bars: Vec<(f64, f64)> = histogram
            .centers()
            .into_iter()
            .zip(histogram.counts.iter())
            .map(|(x, &c)| (x, c as f64))
            .collect();

        let (x_lo, x_hi) = histogram.range();
        let grid = linspace(x_lo, x_hi, DENSITY_POINTS);
        let scale = histogram.total() as f64 * histogram.bin_width();
        let density: Vec<(f64, f64)> = grid
            .iter()
            .zip(gaussian_kde(&returns, &grid))
            .map(|(&x, d)| (x, d * scale))
            .collect();

        let y_top = density
            .iter()
            .map(|&(_, y)| y)
            .fold(histogram.max_count() as f64, f64::max)
            * 1.1;

        let mut datasets = vec![Dataset::default()
            .name("Frequency")
            .marker(symbols::Marker::Block)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(self.theme.histogram))
            .data(&bars)];
        if !density.is_empty() {
            datasets.push(
                Dataset::default()
                    .name("Density")
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(self.theme.density))
                    .data(&density),
            );
        }

        let x_labels = vec![
            Span::raw(format!("{x_lo:.2}")),
            Span::raw(format!("{:.2}", (x_lo + x_hi) / 2.0)),
            Span::raw(format!("{x_hi:.2}")),
        ];
        let y_labels = vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", y_top / 2.0)),
            Span::raw(format!("{y_top:.0}")),
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
                        "Daily Return (%)",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([x_lo, x_hi])
                    .labels(x_labels),
            )
            .y_axis(
                Axis::default()
                    .title(Span::styled(
                        "Frequency",
                        Style::default().fg(self.theme.text_secondary),
                    ))
                    .style(Style::default().fg(self.theme.muted))
                    .bounds([0.0, y_top.max(1.0)])
                    .labels(y_labels),
            );

        chart.render(area, buf);
    }
}
