//! Common UI components around the chart.
//!
//! This module contains the header bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Render the header bar.
///
/// Displays: metric, point counts, marker style and y axis mode.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let total = app.points.len();
    let visible = app.visible_points();
    let clipped = total - visible;

    let mut spans = vec![
        Span::styled(" PTP PLOT ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(
            app.request.metric.label(),
            Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
        Span::styled(format!("{}", total), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" points"),
    ];

    if clipped > 0 {
        spans.push(Span::raw(" ("));
        spans.push(Span::styled(
            format!("{} outside y range", clipped),
            Style::default().fg(app.theme.warning),
        ));
        spans.push(Span::raw(")"));
    }

    spans.push(Span::raw(format!(
        " │ {} │ y: {}",
        app.marker.label(),
        if app.autoscale { "fit" } else { "fixed" }
    )));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Render the status bar at the bottom.
///
/// Shows temporary status messages, otherwise the available controls.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if app.points.is_empty() {
        " No records in window | q/Enter:exit"
    } else {
        " a:fit y m:marker ?:help | q/Enter:exit"
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the chart.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Chart",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  a         Fit y axis to data / fixed"),
        Line::from("  m         Toggle dots / braille"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ?         Toggle this help"),
        Line::from("  q Esc     Exit"),
        Line::from("  Enter     Exit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
