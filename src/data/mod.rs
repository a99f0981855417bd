//! Log records, windowing and export.
//!
//! ## Submodules
//!
//! - [`record`]: Record model, sub-second stripping and metric columns
//! - [`window`]: Window establishment and per-record admission
//! - [`export`]: The filter-and-export pass that feeds the plotter
//!
//! ## Data Flow
//!
//! ```text
//! LogSource (raw fields)
//!        │
//!        ▼
//! Record::from_fields()  ── bad timestamp ──▶ skipped
//!        │
//!        ▼
//! Windower::admit()  ── Stop ──▶ end of pass
//!        │ Emit
//!        ▼
//! "<timestamp> <value>" ──▶ transient file (+ saved copy)
//! ```

pub mod export;
pub mod record;
pub mod window;

pub use export::{export_log, export_records, ExportSummary};
pub use record::{Metric, Record, TIME_FORMAT};
pub use window::{Admission, Window, WindowMode, Windower};
