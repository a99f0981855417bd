//! Filter-and-export pass over a log.
//!
//! Every record that falls inside the window is written as a
//! `"<timestamp> <value>"` line to each of the given sinks. The first sink
//! is normally the transient file handed to the plotter and the second the
//! optional `--save` copy; both receive exactly the same bytes.

use std::fs::File;
use std::io::{BufWriter, Write};

use tracing::{debug, info, trace};

use super::record::{Metric, Record};
use super::window::{Admission, Window, WindowMode, Windower};
use crate::config::PlotConfig;
use crate::error::PlotError;
use crate::source::{FileSource, LogSource};

/// Counters and the resulting window of one export pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Lines read from the source, including skipped ones.
    pub examined: u64,
    /// Lines skipped because their timestamp did not parse.
    pub malformed: u64,
    /// Lines written to the sinks.
    pub emitted: u64,
    /// Whether reading stopped at the end of a bounded window.
    pub stopped_early: bool,
    /// The window, if at least one timestamp parsed.
    pub window: Option<Window>,
}

/// Run the export pass.
///
/// Reads `source` in order, establishes the window from the first valid
/// timestamp and writes each admitted record to every sink. Sinks are
/// flushed before returning.
pub fn export_records<S>(
    source: &mut S,
    mode: WindowMode,
    metric: Metric,
    sinks: &mut [&mut dyn Write],
) -> Result<ExportSummary, PlotError>
where
    S: LogSource + ?Sized,
{
    let mut windower = Windower::new(mode);
    let mut summary = ExportSummary::default();

    while let Some(raw) = source.next_line() {
        let raw = raw?;
        summary.examined += 1;

        let Some(record) = Record::from_fields(raw.line, raw.fields) else {
            trace!(line = raw.line, "skipping line without a valid timestamp");
            summary.malformed += 1;
            continue;
        };

        match windower.admit(record.timestamp)? {
            Admission::Stop => {
                debug!(line = record.line, timestamp = %record.timestamp, "past end of window");
                summary.stopped_early = true;
                break;
            }
            Admission::Skip => {}
            Admission::Emit => {
                let line = record.export_line(metric)?;
                for sink in sinks.iter_mut() {
                    writeln!(sink, "{}", line)?;
                }
                summary.emitted += 1;
            }
        }
    }

    for sink in sinks.iter_mut() {
        sink.flush()?;
    }

    summary.window = windower.window();
    Ok(summary)
}

/// Export the configured log into `transient`.
///
/// Opens the log, creates (or truncates) the `save` file if one is
/// configured, and runs [`export_records`] with both as sinks.
pub fn export_log<W: Write>(config: &PlotConfig, transient: W) -> Result<ExportSummary, PlotError> {
    let logfile = config.logfile.as_deref().ok_or(PlotError::NoLogfile)?;
    let mut source = FileSource::open(logfile, config.delimiter)?;

    let mut transient = BufWriter::new(transient);
    let mut saved = match config.save.as_deref() {
        Some(path) => Some(BufWriter::new(File::create(path)?)),
        None => None,
    };

    let mut sinks: Vec<&mut dyn Write> = vec![&mut transient];
    if let Some(saved) = saved.as_mut() {
        sinks.push(saved);
    }

    let summary = export_records(&mut source, config.window_mode(), config.metric, &mut sinks)?;
    info!(
        source = source.description(),
        metric = %config.metric,
        examined = summary.examined,
        malformed = summary.malformed,
        emitted = summary.emitted,
        stopped_early = summary.stopped_early,
        "Exported log records"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::source::Delimiter;
    use chrono::NaiveTime;
    use std::io::Cursor;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = "\
2010-01-01 09:00:00:000,a,b,0.000500,0.000200
2010-01-01 10:00:00:000,a,b,0.000600,0.000300
2010-01-01 17:00:00:000,a,b,0.000700,0.000400
";

    fn trading_day() -> WindowMode {
        WindowMode::Bounded {
            start: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            end: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
            roll: 0,
        }
    }

    fn run(
        log: &str,
        mode: WindowMode,
        metric: Metric,
    ) -> Result<(String, ExportSummary), PlotError> {
        let mut source = FileSource::from_reader(Cursor::new(log), Delimiter::Comma, "memory");
        let mut out = Vec::new();
        let summary = export_records(&mut source, mode, metric, &mut [&mut out])?;
        Ok((String::from_utf8(out).unwrap(), summary))
    }

    #[test]
    fn test_default_window_keeps_one_row() {
        let (out, summary) = run(SAMPLE, trading_day(), Metric::Delay).unwrap();
        assert_eq!(out, "2010-01-01 10:00:00 0.000600\n");
        assert_eq!(summary.emitted, 1);
        assert!(summary.stopped_early);
    }

    #[test]
    fn test_offset_metric() {
        let (out, _) = run(SAMPLE, trading_day(), Metric::Offset).unwrap();
        assert_eq!(out, "2010-01-01 10:00:00 0.000300\n");
    }

    #[test]
    fn test_all_mode_emits_every_parsable_row() {
        let (out, summary) = run(SAMPLE, WindowMode::All, Metric::Delay).unwrap();
        assert_eq!(out.lines().count(), 3);
        assert!(out.starts_with("2010-01-01 09:00:00 0.000500\n"));
        assert!(!summary.stopped_early);

        let window = summary.window.unwrap();
        assert_eq!(window.start.to_string(), "2010-01-01 09:00:00");
        assert_eq!(window.end.to_string(), "2010-01-01 17:00:00");
    }

    #[test]
    fn test_malformed_timestamps_are_skipped() {
        let log = "\
timestamp,state,clock,delay,offset
garbage
2010-01-01 10:00:00:000,a,b,0.000600,0.000300
2010-01-01 99:00:00:000,a,b,0.000900,0.000900
2010-01-01 11:00:00:000,a,b,0.000650,0.000310
";
        let (out, summary) = run(log, trading_day(), Metric::Delay).unwrap();
        assert_eq!(out, "2010-01-01 10:00:00 0.000600\n2010-01-01 11:00:00 0.000650\n");
        assert_eq!(summary.examined, 5);
        assert_eq!(summary.malformed, 3);
        assert_eq!(summary.emitted, 2);
        // The header line did not anchor the window
        assert_eq!(summary.window.unwrap().start.to_string(), "2010-01-01 09:30:00");
    }

    #[test]
    fn test_stops_before_reading_past_end() {
        // The bad value after the stop row is never parsed.
        let log = "\
2010-01-01 10:00:00:000,a,b,0.000600,0.000300
2010-01-01 17:00:00:000,a,b,0.000700,0.000400
2010-01-01 12:00:00:000,a,b,not-a-number,0.000400
";
        let (out, summary) = run(log, trading_day(), Metric::Delay).unwrap();
        assert_eq!(out, "2010-01-01 10:00:00 0.000600\n");
        assert_eq!(summary.examined, 2);
    }

    #[test]
    fn test_bad_value_outside_window_is_ignored() {
        let log = "\
2010-01-01 09:00:00:000,a,b,oops,0.000200
2010-01-01 10:00:00:000,a,b,0.000600,0.000300
";
        let (out, _) = run(log, trading_day(), Metric::Delay).unwrap();
        assert_eq!(out, "2010-01-01 10:00:00 0.000600\n");
    }

    #[test]
    fn test_bad_value_inside_window_is_fatal() {
        let log = "\
2010-01-01 10:00:00:000,a,b,0.000600,0.000300
2010-01-01 11:00:00:000,a,b,oops,0.000300
";
        let err = run(log, trading_day(), Metric::Delay).unwrap_err();
        assert!(matches!(err, PlotError::MalformedValue { line: 2, .. }));
    }

    #[test]
    fn test_roll_shifts_window() {
        let log = "\
2010-01-01 23:00:00:000,a,b,0.000100,0.000100
2010-01-02 10:00:00:000,a,b,0.000600,0.000300
2010-01-02 17:00:00:000,a,b,0.000700,0.000400
";
        let mode = match trading_day() {
            WindowMode::Bounded { start, end, .. } => WindowMode::Bounded { start, end, roll: 1 },
            WindowMode::All => unreachable!(),
        };
        let (out, _) = run(log, mode, Metric::Delay).unwrap();
        assert_eq!(out, "2010-01-02 10:00:00 0.000600\n");
    }

    #[test]
    fn test_sinks_receive_identical_bytes() {
        let mut source = FileSource::from_reader(Cursor::new(SAMPLE), Delimiter::Comma, "memory");
        let mut transient = Vec::new();
        let mut saved = Vec::new();
        export_records(
            &mut source,
            WindowMode::All,
            Metric::Offset,
            &mut [&mut transient, &mut saved],
        )
        .unwrap();
        assert!(!transient.is_empty());
        assert_eq!(transient, saved);
    }

    #[test]
    fn test_empty_log() {
        let (out, summary) = run("", WindowMode::All, Metric::Delay).unwrap();
        assert!(out.is_empty());
        assert_eq!(summary, ExportSummary::default());
    }

    fn config_for(logfile: PathBuf, save: Option<PathBuf>) -> PlotConfig {
        let mut config = PlotConfig::try_from(Settings::default()).unwrap();
        config.logfile = Some(logfile);
        config.save = save;
        config
    }

    #[test]
    fn test_export_log_with_saved_copy() {
        let mut log = NamedTempFile::new().unwrap();
        write!(log, "{}", SAMPLE).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let save = dir.path().join("delay.dat");

        let mut transient = Vec::new();
        let config = config_for(log.path().to_path_buf(), Some(save.clone()));
        let summary = export_log(&config, &mut transient).unwrap();

        assert_eq!(summary.emitted, 1);
        assert_eq!(transient, b"2010-01-01 10:00:00 0.000600\n");
        assert_eq!(std::fs::read(&save).unwrap(), transient);
    }

    #[test]
    fn test_export_log_truncates_saved_copy() {
        let mut log = NamedTempFile::new().unwrap();
        write!(log, "{}", SAMPLE).unwrap();
        let mut save = NamedTempFile::new().unwrap();
        write!(save, "stale contents from an earlier run\n").unwrap();

        let config = config_for(log.path().to_path_buf(), Some(save.path().to_path_buf()));
        export_log(&config, std::io::sink()).unwrap();

        let saved = std::fs::read_to_string(save.path()).unwrap();
        assert_eq!(saved, "2010-01-01 10:00:00 0.000600\n");
    }

    #[test]
    fn test_export_log_missing_file() {
        let config = config_for(PathBuf::from("/nonexistent/ptpd.log"), None);
        let err = export_log(&config, std::io::sink()).unwrap_err();
        assert!(matches!(err, PlotError::FileAccess { .. }));

        let mut config = config;
        config.logfile = None;
        let err = export_log(&config, std::io::sink()).unwrap_err();
        assert!(matches!(err, PlotError::NoLogfile));
    }
}
