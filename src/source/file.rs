//! Delimited log reader.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{Delimiter, LogSource, RawLine};
use crate::error::PlotError;

/// A log source backed by a delimited text reader, usually a file.
///
/// Rows may carry any number of fields. Bytes that are not valid UTF-8 are
/// replaced, which makes the affected field fail to parse downstream rather
/// than aborting the read.
pub struct FileSource<R = File> {
    reader: csv::Reader<R>,
    record: csv::ByteRecord,
    description: String,
    lines_read: u64,
}

impl FileSource<File> {
    /// Open a log file.
    pub fn open<P: AsRef<Path>>(path: P, delimiter: Delimiter) -> Result<Self, PlotError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| PlotError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(
            file,
            delimiter,
            format!("file: {}", path.display()),
        ))
    }
}

impl<R: Read> FileSource<R> {
    /// Wrap any reader.
    pub fn from_reader(reader: R, delimiter: Delimiter, description: impl Into<String>) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter.as_byte())
            .from_reader(reader);
        Self {
            reader,
            record: csv::ByteRecord::new(),
            description: description.into(),
            lines_read: 0,
        }
    }
}

impl<R: Read> LogSource for FileSource<R> {
    fn next_line(&mut self) -> Option<Result<RawLine, PlotError>> {
        match self.reader.read_byte_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                self.lines_read += 1;
                let line = self
                    .record
                    .position()
                    .map(|pos| pos.line())
                    .unwrap_or(self.lines_read);
                let fields = self
                    .record
                    .iter()
                    .map(|field| String::from_utf8_lossy(field).into_owned())
                    .collect();
                Some(Ok(RawLine { line, fields }))
            }
            Err(e) => Some(Err(e.into())),
        }
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl<R> std::fmt::Debug for FileSource<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSource")
            .field("description", &self.description)
            .field("lines_read", &self.lines_read)
            .finish()
    }
}
