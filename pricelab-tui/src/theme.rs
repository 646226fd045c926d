//! Chart theme tokens for the PriceLab TUI
//!
//! Series colors follow the usual price-trend convention: close in blue,
//! the short moving average in orange, the long one in red.

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Chart surface
    pub background: Color,
    /// Borders and axes
    pub muted: Color,
    /// Axis titles and footer text
    pub text_secondary: Color,
    /// Close price line
    pub close: Color,
    /// 50-row moving average
    pub ma_short: Color,
    /// 200-row moving average
    pub ma_long: Color,
    /// Histogram bars
    pub histogram: Color,
    /// Density overlay
    pub density: Color,
    /// Placeholder / warning text
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            muted: Color::Rgb(100, 149, 237),
            text_secondary: Color::Rgb(170, 170, 170),
            close: Color::Rgb(30, 144, 255),
            ma_short: Color::Rgb(255, 140, 0),
            ma_long: Color::Rgb(220, 20, 60),
            histogram: Color::Rgb(70, 130, 180),
            density: Color::Rgb(0, 255, 255),
            warning: Color::Rgb(255, 140, 0),
        }
    }
}
