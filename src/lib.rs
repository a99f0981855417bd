//! # ptp-plot
//!
//! Plot the one-way delay or the offset from master recorded in a PTP
//! slave log.
//!
//! The log is read once, in order. The first record with a valid timestamp
//! anchors a time window, records inside the window are exported as
//! `"<timestamp> <value>"` lines to a temporary data file (and optionally a
//! saved copy), and that file is handed to a plotter: either an interactive
//! chart in the terminal or a PNG image.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌─────────────────────────┐    ┌──────────────┐
//! │  source  │───▶│          data           │───▶│     plot     │
//! │ (fields) │    │ record ▶ window ▶ export│    │ image | tui  │
//! └──────────┘    └────────────┬────────────┘    └──────┬───────┘
//!                              │                        │
//!                              ▼                        ▼
//!                   temp file (+ --save copy)     app / events / ui
//! ```
//!
//! - **[`config`]**: Defaults, config file and environment layering, validation
//! - **[`source`]**: [`LogSource`] trait and the delimited [`FileSource`]
//! - **[`data`]**: Records, window selection and the export pass
//! - **[`plot`]**: [`Plotter`] trait with PNG and terminal implementations
//! - **[`app`]**, **[`events`]**, **[`ui`]**: The interactive chart viewer
//!
//! ## Usage
//!
//! ```bash
//! # Delay between 09:30 and 16:30 on the first day of the log
//! ptp-plot --logfile ptpd.log
//!
//! # Offset over the whole log, saved and rendered to ptpd.log-offset.png
//! ptp-plot --logfile ptpd.log --type offset --all --save offset.dat --print
//! ```
//!
//! ### As a library
//!
//! ```
//! use std::io::Cursor;
//! use chrono::NaiveTime;
//! use ptp_plot::{export_records, Delimiter, FileSource, Metric, WindowMode};
//!
//! let log = "\
//! 2010-01-01 09:00:00:000,a,b,0.000500,0.000200
//! 2010-01-01 10:00:00:000,a,b,0.000600,0.000300
//! 2010-01-01 17:00:00:000,a,b,0.000700,0.000400
//! ";
//! let mut source = FileSource::from_reader(Cursor::new(log), Delimiter::Comma, "example");
//! let mode = WindowMode::Bounded {
//!     start: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
//!     end: NaiveTime::from_hms_opt(16, 30, 0).unwrap(),
//!     roll: 0,
//! };
//!
//! let mut out = Vec::new();
//! export_records(&mut source, mode, Metric::Delay, &mut [&mut out]).unwrap();
//! assert_eq!(out, b"2010-01-01 10:00:00 0.000600\n");
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod plot;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use config::{PlotConfig, Settings};
pub use data::{export_log, export_records, ExportSummary, Metric, Window, WindowMode};
pub use error::PlotError;
pub use plot::{ImagePlotter, PlotRequest, Plotter, Series, TerminalPlotter};
pub use source::{Delimiter, FileSource, LogSource};
