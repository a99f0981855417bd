//! Error types for reading, filtering and exporting a PTP log.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::Metric;

/// Errors that abort a plotting run.
///
/// Records with an unparsable timestamp are not errors; they are skipped
/// by the export loop and never reach this type.
#[derive(Debug, Error)]
pub enum PlotError {
    /// An option value is not acceptable (metric, time of day, roll, ...).
    #[error("{0}")]
    Usage(String),

    /// The log file could not be opened.
    #[error("Could not open {}: {source}", .path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No log file was configured.
    #[error("Could not open log file: none given (use --logfile)")]
    NoLogfile,

    /// The metric column of an emitted record is missing or not a number.
    #[error("line {line}: {metric} value {value:?} is not a number")]
    MalformedValue {
        line: u64,
        metric: Metric,
        value: String,
    },

    /// Reading the log failed part way through.
    #[error("Failed to read log: {0}")]
    Read(#[from] csv::Error),

    /// Writing the exported data failed.
    #[error("Failed to write exported data: {0}")]
    Io(#[from] std::io::Error),
}

impl PlotError {
    /// Shorthand for a [`PlotError::Usage`] error.
    pub fn usage(message: impl Into<String>) -> Self {
        PlotError::Usage(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_access_message_names_path() {
        let err = PlotError::FileAccess {
            path: PathBuf::from("/var/log/ptpd.log"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().starts_with("Could not open /var/log/ptpd.log"));
    }

    #[test]
    fn test_malformed_value_message() {
        let err = PlotError::MalformedValue {
            line: 7,
            metric: Metric::Offset,
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "line 7: offset value \"abc\" is not a number");
    }
}
