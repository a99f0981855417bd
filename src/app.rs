//! Interactive viewer state.

use std::time::{Duration, Instant};

use crate::plot::series::{format_offset, Series};
use crate::plot::PlotRequest;
use crate::ui::Theme;

/// How long a status message stays visible.
const STATUS_MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Number of labels on each axis.
const AXIS_LABELS: usize = 3;

/// Point marker used by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    /// One dot per cell, the classic "dots" plot style.
    Dot,
    /// Braille patterns, higher resolution on most terminals.
    Braille,
}

impl MarkerStyle {
    pub fn toggle(self) -> Self {
        match self {
            MarkerStyle::Dot => MarkerStyle::Braille,
            MarkerStyle::Braille => MarkerStyle::Dot,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MarkerStyle::Dot => "dots",
            MarkerStyle::Braille => "braille",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub show_help: bool,
    /// Fit the y axis to the data instead of the configured range.
    pub autoscale: bool,
    pub marker: MarkerStyle,

    pub request: PlotRequest,
    pub series: Series,
    /// Chart points as (seconds since first sample, value).
    pub points: Vec<(f64, f64)>,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a viewer with the theme detected from the terminal.
    pub fn new(series: Series, request: PlotRequest) -> Self {
        Self::with_theme(series, request, Theme::auto_detect())
    }

    pub fn with_theme(series: Series, request: PlotRequest, theme: Theme) -> Self {
        let points = series.offsets();
        Self {
            running: true,
            show_help: false,
            autoscale: false,
            marker: MarkerStyle::Dot,
            request,
            series,
            points,
            theme,
            status_message: None,
        }
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired.
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < STATUS_MESSAGE_TTL {
                return Some(msg);
            }
        }
        None
    }

    /// X axis bounds in seconds since the first sample.
    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, self.series.span_secs()]
    }

    /// Y axis bounds, either configured or fitted to the data.
    pub fn y_bounds(&self) -> [f64; 2] {
        let (min, max) = self.request.y_range;
        if !self.autoscale {
            return [min, max];
        }
        match self.series.value_bounds() {
            Some((lo, hi)) if hi > lo => {
                let pad = (hi - lo) * 0.05;
                [lo - pad, hi + pad]
            }
            Some((v, _)) => {
                let pad = (v.abs() * 0.1).max(1e-6);
                [v - pad, v + pad]
            }
            None => [min, max],
        }
    }

    /// Timestamp labels at the start, middle and end of the x axis.
    pub fn x_labels(&self) -> Vec<String> {
        let Some((origin, _)) = self.series.time_bounds() else {
            return Vec::new();
        };
        let [lo, hi] = self.x_bounds();
        spread(lo, hi)
            .map(|secs| format_offset(origin, secs, self.request.time_format))
            .collect()
    }

    /// Value labels in seconds, six decimals like the exported data.
    pub fn y_labels(&self) -> Vec<String> {
        let [lo, hi] = self.y_bounds();
        spread(lo, hi).map(|v| format!("{:.6}", v)).collect()
    }

    /// Number of points inside the current y bounds.
    pub fn visible_points(&self) -> usize {
        let [lo, hi] = self.y_bounds();
        self.points.iter().filter(|(_, v)| *v >= lo && *v <= hi).count()
    }

    pub fn toggle_autoscale(&mut self) {
        self.autoscale = !self.autoscale;
        let message = if self.autoscale {
            "Y axis fitted to data".to_string()
        } else {
            format!(
                "Y axis fixed to {:.6} .. {:.6}",
                self.request.y_range.0, self.request.y_range.1
            )
        };
        self.set_status_message(message);
    }

    pub fn toggle_marker(&mut self) {
        self.marker = self.marker.toggle();
        self.set_status_message(format!("Marker: {}", self.marker.label()));
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Acknowledge the plot and leave the viewer.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn spread(lo: f64, hi: f64) -> impl Iterator<Item = f64> {
    let step = (hi - lo) / (AXIS_LABELS - 1) as f64;
    (0..AXIS_LABELS).map(move |i| lo + step * i as f64)
}
