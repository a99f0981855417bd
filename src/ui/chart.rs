//! Scatter chart of the exported series.

use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

use crate::app::{App, MarkerStyle};

/// Render the chart into `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let marker = match app.marker {
        MarkerStyle::Dot => symbols::Marker::Dot,
        MarkerStyle::Braille => symbols::Marker::Braille,
    };

    let dataset = Dataset::default()
        .name(app.request.metric.name())
        .marker(marker)
        .graph_type(GraphType::Scatter)
        .style(app.theme.series_style())
        .data(&app.points);

    let block = Block::default()
        .title(format!(" {} ", app.request.metric.label()))
        .title_style(app.theme.header)
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let mut x_axis = Axis::default()
        .title(app.request.x_label.as_str())
        .style(app.theme.axis_style())
        .bounds(app.x_bounds());
    // No timestamps to show without data
    let x_labels = app.x_labels();
    if !x_labels.is_empty() {
        x_axis = x_axis.labels(x_labels);
    }

    let y_axis = Axis::default()
        .title(app.request.y_label.as_str())
        .style(app.theme.axis_style())
        .bounds(app.y_bounds())
        .labels(app.y_labels());

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .hidden_legend_constraints((Constraint::Ratio(1, 4), Constraint::Ratio(1, 4)));

    frame.render_widget(chart, area);
}
