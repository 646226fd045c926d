//! Chart widgets for the enriched table.

pub mod price_chart;
pub mod return_histogram;

pub use price_chart::PriceTrendChart;
pub use return_histogram::{ReturnHistogram, HISTOGRAM_BINS};

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Widget},
};

use crate::theme::Theme;

/// Bordered block with a centered-left message, used when there is no data.
pub(crate) fn render_placeholder(
    title: &str,
    message: &str,
    theme: &Theme,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.muted))
        .style(Style::default().bg(theme.background));
    let inner = block.inner(area);
    block.render(area, buf);
    if inner.width > 0 && inner.height > 0 {
        let y = inner.y + inner.height / 2;
        buf.set_stringn(
            inner.x + 1,
            y,
            message,
            inner.width.saturating_sub(1) as usize,
            Style::default().fg(theme.warning),
        );
    }
}
