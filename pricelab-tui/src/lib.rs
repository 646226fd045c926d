//! PriceLab TUI - terminal charts for the enriched price table
//!
//! Two views, shown in order:
//! - Price trend: close with its 50- and 200-row moving averages
//! - Return distribution: histogram of daily returns with a density overlay

pub mod panels;
pub mod presenter;
pub mod stats;
pub mod theme;

pub use presenter::TerminalPresenter;
pub use theme::Theme;

#[cfg(test)]
mod test_helpers;
