//! Dark terminal theme for the grade chart viewer.
//!
//! Chart colors (bars, band, mean line) come from the `ChartStyle` carried by
//! each `RenderSpec`; this module only covers the chrome around the chart.
//!
//! # Color Palette
//! - **Background**: deep charcoal
//! - **Accent**: soft green (titles, focus, buttons)
//! - **Warning**: amber (clamped scores, warnings)
//! - **Neutral**: lavender (secondary numbers)
//! - **Muted**: steel blue (hints, axis labels)

use ratatui::style::{Color, Modifier, Style};

use gradechart_core::Rgb;

pub const BACKGROUND: Color = Color::Rgb(18, 18, 20);
pub const ACCENT: Color = Color::Rgb(0x33, 0xcc, 0x66);
pub const WARNING: Color = Color::Rgb(255, 170, 0);
pub const NEUTRAL: Color = Color::Rgb(147, 112, 219);
pub const MUTED: Color = Color::Rgb(100, 149, 237);
pub const TEXT: Color = Color::White;

/// Convert a core color to a terminal color.
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Style {
    Style::default().fg(ACCENT)
}

pub fn accent_bold() -> Style {
    accent().add_modifier(Modifier::BOLD)
}

pub fn warning() -> Style {
    Style::default().fg(WARNING)
}

pub fn neutral() -> Style {
    Style::default().fg(NEUTRAL)
}

pub fn muted() -> Style {
    Style::default().fg(MUTED)
}

pub fn text() -> Style {
    Style::default().fg(TEXT)
}

pub fn panel_border(active: bool) -> Style {
    if active {
        accent()
    } else {
        muted()
    }
}

pub fn panel_title(active: bool) -> Style {
    if active {
        accent_bold()
    } else {
        muted()
    }
}

/// A clickable button; highlighted right after it was pressed.
pub fn button(pressed: bool) -> Style {
    if pressed {
        Style::default().fg(BACKGROUND).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        accent_bold()
    }
}
