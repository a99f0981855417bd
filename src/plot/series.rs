//! Reading the exported two-column data back for plotting.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDateTime, TimeDelta};

/// Time series read from an exported data file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    /// Points in file order.
    pub points: Vec<(NaiveDateTime, f64)>,
}

impl Series {
    /// Load a `"<timestamp> <value>"` file.
    pub fn load(path: &Path, time_format: &str) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open data file {}", path.display()))?;
        Self::from_reader(BufReader::new(file), time_format)
            .with_context(|| format!("Failed to read data file {}", path.display()))
    }

    /// Parse `"<timestamp> <value>"` lines. Blank lines are ignored.
    pub fn from_reader<R: BufRead>(reader: R, time_format: &str) -> Result<Self> {
        let mut points = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let (stamp, value) = line
                .rsplit_once(' ')
                .ok_or_else(|| anyhow!("line {}: expected \"<timestamp> <value>\"", index + 1))?;
            let timestamp = NaiveDateTime::parse_from_str(stamp.trim(), time_format)
                .with_context(|| format!("line {}: bad timestamp {:?}", index + 1, stamp))?;
            let value: f64 = value
                .parse()
                .with_context(|| format!("line {}: bad value {:?}", index + 1, value))?;
            points.push((timestamp, value));
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Earliest and latest timestamp.
    pub fn time_bounds(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let min = self.points.iter().map(|(t, _)| *t).min()?;
        let max = self.points.iter().map(|(t, _)| *t).max()?;
        Some((min, max))
    }

    /// Smallest and largest value.
    pub fn value_bounds(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let min = self.points.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
        let max = self.points.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }

    /// Points as `(seconds since the earliest timestamp, value)`.
    pub fn offsets(&self) -> Vec<(f64, f64)> {
        let Some((origin, _)) = self.time_bounds() else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|(t, v)| ((*t - origin).num_seconds() as f64, *v))
            .collect()
    }

    /// Span of the x axis in seconds, at least one second.
    pub fn span_secs(&self) -> f64 {
        self.time_bounds()
            .map(|(min, max)| (max - min).num_seconds() as f64)
            .unwrap_or(0.0)
            .max(1.0)
    }
}

/// Format an x axis position given in seconds since `origin`.
pub fn format_offset(origin: NaiveDateTime, secs: f64, time_format: &str) -> String {
    let at = origin + TimeDelta::seconds(secs.round() as i64);
    at.format(time_format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TIME_FORMAT;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const DATA: &str = "\
2010-01-01 10:00:00 0.000600
2010-01-01 10:00:10 0.000650

2010-01-01 09:59:50 -0.000100
";

    #[test]
    fn test_from_reader() {
        let series = Series::from_reader(Cursor::new(DATA), TIME_FORMAT).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points[1].1, 0.00065);

        let (min, max) = series.time_bounds().unwrap();
        assert_eq!(min.to_string(), "2010-01-01 09:59:50");
        assert_eq!(max.to_string(), "2010-01-01 10:00:10");
        assert_eq!(series.value_bounds(), Some((-0.0001, 0.00065)));
        assert_eq!(series.span_secs(), 20.0);
    }

    #[test]
    fn test_offsets_relative_to_earliest() {
        let series = Series::from_reader(Cursor::new(DATA), TIME_FORMAT).unwrap();
        let offsets = series.offsets();
        assert_eq!(offsets, vec![(10.0, 0.0006), (20.0, 0.00065), (0.0, -0.0001)]);
    }

    #[test]
    fn test_bad_line() {
        let err = Series::from_reader(Cursor::new("2010-01-01 10:00:00 abc\n"), TIME_FORMAT)
            .unwrap_err();
        assert!(err.to_string().contains("line 1"));
    }

    #[test]
    fn test_empty_series() {
        let series = Series::from_reader(Cursor::new(""), TIME_FORMAT).unwrap();
        assert!(series.is_empty());
        assert!(series.time_bounds().is_none());
        assert!(series.offsets().is_empty());
        assert_eq!(series.span_secs(), 1.0);
    }

    #[test]
    fn test_load_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", DATA).unwrap();
        let series = Series::load(file.path(), TIME_FORMAT).unwrap();
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn test_format_offset() {
        let origin = NaiveDateTime::parse_from_str("2010-01-01 23:59:30", TIME_FORMAT).unwrap();
        assert_eq!(format_offset(origin, 45.0, TIME_FORMAT), "2010-01-02 00:00:15");
    }
}
