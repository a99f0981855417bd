//! Theme configuration for the chart viewer.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color of the plotted points.
    pub series: Color,
    /// Color for axes and their labels.
    pub axis: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for titles.
    pub header: Style,
    /// Color for warnings, e.g. points clipped by the fixed y range.
    pub warning: Color,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            series: Color::Yellow,
            axis: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            warning: Color::Yellow,
            border_type: BorderType::Rounded,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            series: Color::Magenta,
            axis: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            warning: Color::Red,
            border_type: BorderType::Rounded,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Style for the plotted points.
    pub fn series_style(&self) -> Style {
        Style::default().fg(self.series)
    }

    /// Style for axis titles and labels.
    pub fn axis_style(&self) -> Style {
        Style::default().fg(self.axis)
    }
}
