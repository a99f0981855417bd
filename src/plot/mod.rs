//! Plotting collaborators.
//!
//! The export pass writes a two-column data file; a [`Plotter`] takes that
//! file plus axis configuration in a [`PlotRequest`] and draws it.
//!
//! - [`ImagePlotter`]: renders a PNG with plotters
//! - [`TerminalPlotter`]: interactive chart in the terminal, closed by the user

pub mod image;
pub mod series;
pub mod terminal;

pub use image::ImagePlotter;
pub use series::Series;
pub use terminal::TerminalPlotter;

use std::path::PathBuf;

use anyhow::Result;

use crate::config::PlotConfig;
use crate::data::{ExportSummary, Metric, TIME_FORMAT};

/// Everything a plotter needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    /// Two-column `"<timestamp> <value>"` file.
    pub data_path: PathBuf,
    /// Format of the first column.
    pub time_format: &'static str,
    pub metric: Metric,
    /// Fixed y axis range.
    pub y_range: (f64, f64),
    pub y_label: String,
    /// Log file and effective window.
    pub x_label: String,
    /// Render to this image instead of showing the chart.
    pub export: Option<PathBuf>,
}

impl PlotRequest {
    /// Build the request for a finished export pass.
    pub fn new(config: &PlotConfig, summary: &ExportSummary, data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            time_format: TIME_FORMAT,
            metric: config.metric,
            y_range: (config.ymin, config.ymax),
            y_label: config.metric.axis_label(),
            x_label: window_label(config, summary),
            export: config.image_path(),
        }
    }
}

/// X axis label: the log file followed by the effective window.
///
/// Bounded windows show the configured times of day. With `--all` the
/// window runs from the first timestamp to the last one seen.
pub fn window_label(config: &PlotConfig, summary: &ExportSummary) -> String {
    let logfile = config
        .logfile
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();

    if !config.all {
        return format!("{} {} - {}", logfile, config.start_label(), config.end_label());
    }

    match summary.window {
        Some(window) => format!("{} {} - {}", logfile, window.start, window.end),
        None => format!("{} (no records)", logfile),
    }
}

/// A chart renderer.
pub trait Plotter {
    /// Draw the data described by `request`.
    fn plot(&mut self, request: &PlotRequest) -> Result<()>;
}

/// Render with the plotter the request calls for.
pub fn render(request: &PlotRequest) -> Result<()> {
    if request.export.is_some() {
        ImagePlotter::default().plot(request)
    } else {
        TerminalPlotter::default().plot(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::data::Window;
    use chrono::NaiveDateTime;

    fn config(all: bool) -> PlotConfig {
        let mut config = PlotConfig::try_from(Settings::default()).unwrap();
        config.logfile = Some(PathBuf::from("slave.log"));
        config.all = all;
        config
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, TIME_FORMAT).unwrap()
    }

    #[test]
    fn test_bounded_label_uses_configured_times() {
        let label = window_label(&config(false), &ExportSummary::default());
        assert_eq!(label, "slave.log 09:30:00 - 16:30:00");
    }

    #[test]
    fn test_all_label_uses_first_and_last_seen() {
        let summary = ExportSummary {
            window: Some(Window {
                start: ts("2010-01-01 09:00:00"),
                end: ts("2010-01-01 17:00:00"),
            }),
            ..ExportSummary::default()
        };
        let label = window_label(&config(true), &summary);
        assert_eq!(label, "slave.log 2010-01-01 09:00:00 - 2010-01-01 17:00:00");
    }

    #[test]
    fn test_all_label_without_records() {
        let label = window_label(&config(true), &ExportSummary::default());
        assert_eq!(label, "slave.log (no records)");
    }

    #[test]
    fn test_request_from_config() {
        let mut config = config(false);
        config.metric = Metric::Offset;
        config.print = true;

        let request = PlotRequest::new(&config, &ExportSummary::default(), "/tmp/data");
        assert_eq!(request.data_path, PathBuf::from("/tmp/data"));
        assert_eq!(request.time_format, "%Y-%m-%d %H:%M:%S");
        assert_eq!(request.y_range, (0.0, 0.001));
        assert_eq!(request.y_label, "Seconds, Offset");
        assert_eq!(request.export, Some(PathBuf::from("slave.log-offset.png")));
    }
}
