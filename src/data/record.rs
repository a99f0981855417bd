//! Log record model.
//!
//! A PTP slave log line looks like
//!
//! ```text
//! 2010-01-01 10:00:00:123456, state, master, 0.000600, 0.000300, ...
//! ```
//!
//! Column 0 carries a timestamp with a trailing `:subsecond` part, column 3
//! the one-way delay and column 4 the offset from master, both in seconds.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::error::PlotError;

/// Whole-second timestamp format understood by the plotters.
pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which measurement column to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// One-way delay (column 3).
    #[default]
    Delay,
    /// Offset from master (column 4).
    Offset,
}

impl Metric {
    /// Zero-based column holding this metric.
    pub fn column(self) -> usize {
        match self {
            Metric::Delay => 3,
            Metric::Offset => 4,
        }
    }

    /// Name used on the command line and in file names.
    pub fn name(self) -> &'static str {
        match self {
            Metric::Delay => "delay",
            Metric::Offset => "offset",
        }
    }

    /// Human-readable axis label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Delay => "One Way Delay",
            Metric::Offset => "Offset",
        }
    }

    /// Y axis description, values are always in seconds.
    pub fn axis_label(self) -> String {
        format!("Seconds, {}", self.label())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "delay" => Ok(Metric::Delay),
            "offset" => Ok(Metric::Offset),
            _ => Err(PlotError::usage("You must choose either delay or offset.")),
        }
    }
}

/// Strip the trailing `:subsecond` component of a timestamp field.
///
/// Everything after the last `:` is dropped. Returns `None` when the field
/// has no `:` at all.
pub fn strip_subseconds(field: &str) -> Option<&str> {
    field.trim().rsplit_once(':').map(|(head, _)| head.trim_end())
}

/// Parse a whole-second timestamp in [`TIME_FORMAT`].
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIME_FORMAT).ok()
}

/// A log line whose timestamp parsed successfully.
///
/// The metric columns are kept as raw text and only parsed when the record
/// is actually exported, so a bad value outside the window is harmless.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// 1-based line number in the log.
    pub line: u64,
    /// Timestamp text with the sub-second part removed.
    pub stamp: String,
    /// Parsed timestamp.
    pub timestamp: NaiveDateTime,
    fields: Vec<String>,
}

impl Record {
    /// Build a record from the fields of one log line.
    ///
    /// Returns `None` if the line is blank or its timestamp does not parse.
    pub fn from_fields<I, S>(line: u64, fields: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();
        let stamp = strip_subseconds(fields.first()?)?.to_string();
        let timestamp = parse_timestamp(&stamp)?;
        Some(Self {
            line,
            stamp,
            timestamp,
            fields,
        })
    }

    /// Parse the chosen metric column as seconds.
    pub fn value(&self, metric: Metric) -> Result<f64, PlotError> {
        let raw = self.fields.get(metric.column()).map(String::as_str).unwrap_or("");
        raw.trim().parse::<f64>().map_err(|_| PlotError::MalformedValue {
            line: self.line,
            metric,
            value: raw.to_string(),
        })
    }

    /// Format the exported `"<timestamp> <value>"` line, without newline.
    pub fn export_line(&self, metric: Metric) -> Result<String, PlotError> {
        let value = self.value(metric)?;
        if value.is_nan() {
            // printf-style `nan`, not `NaN`
            return Ok(format!("{} nan", self.stamp));
        }
        Ok(format!("{} {:.6}", self.stamp, value))
    }
}
