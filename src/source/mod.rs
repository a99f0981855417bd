//! Log input abstraction.
//!
//! A [`LogSource`] yields the raw fields of each log line in file order.
//! Timestamp parsing and windowing happen downstream in [`crate::data`].

mod file;

pub use file::FileSource;

use std::fmt;
use std::str::FromStr;

use crate::error::PlotError;

/// One line of the log split into fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based line number.
    pub line: u64,
    pub fields: Vec<String>,
}

/// Trait for reading log lines from various inputs.
///
/// # Example
///
/// ```
/// use std::io::Cursor;
/// use ptp_plot::{Delimiter, FileSource, LogSource};
///
/// let log = "2010-01-01 10:00:00:000,a,b,0.0006,0.0003\n";
/// let mut source = FileSource::from_reader(Cursor::new(log), Delimiter::Comma, "memory");
/// let line = source.next_line().unwrap().unwrap();
/// assert_eq!(line.fields.len(), 5);
/// ```
pub trait LogSource {
    /// Read the next line.
    ///
    /// Returns `None` at end of input. Errors are unrecoverable read
    /// failures, not malformed content.
    fn next_line(&mut self) -> Option<Result<RawLine, PlotError>>;

    /// Returns a human-readable description of the source.
    fn description(&self) -> &str;
}

/// Field separator of the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delimiter::Comma => f.write_str("comma"),
            Delimiter::Tab => f.write_str("tab"),
        }
    }
}

impl FromStr for Delimiter {
    type Err = PlotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "comma" | "," => Ok(Delimiter::Comma),
            "tab" | "\t" => Ok(Delimiter::Tab),
            other => Err(PlotError::usage(format!(
                "Unknown delimiter {:?}, expected comma or tab",
                other
            ))),
        }
    }
}
