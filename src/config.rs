//! Run configuration.
//!
//! Options are layered, lowest precedence first:
//!
//! 1. built-in defaults (the same as the CLI defaults)
//! 2. an optional config file (`--config`, any format the `config` crate reads)
//! 3. `PTP_PLOT_*` environment variables, e.g. `PTP_PLOT_TYPE=offset`
//! 4. command-line flags
//!
//! The layered [`Settings`] hold raw values; [`PlotConfig`] is the
//! validated form used by the rest of the crate.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use chrono::NaiveTime;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::data::{Metric, WindowMode};
use crate::error::PlotError;
use crate::source::Delimiter;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PTP_PLOT";

/// Format of the `start`/`end` options.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

pub const DEFAULT_START: &str = "09:30:00";
pub const DEFAULT_END: &str = "16:30:00";
pub const DEFAULT_YMIN: f64 = 0.0;
pub const DEFAULT_YMAX: f64 = 0.001;

/// Raw, layered option values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub all: bool,
    #[serde(rename = "type")]
    pub metric: String,
    #[serde(default)]
    pub logfile: Option<PathBuf>,
    pub start: String,
    pub end: String,
    pub roll: i64,
    /// Render a `<logfile>-<type>.png` image instead of the interactive chart.
    pub print: bool,
    pub ymin: f64,
    pub ymax: f64,
    #[serde(default)]
    pub save: Option<PathBuf>,
    pub delimiter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            all: false,
            metric: Metric::Delay.name().to_string(),
            logfile: None,
            start: DEFAULT_START.to_string(),
            end: DEFAULT_END.to_string(),
            roll: 0,
            print: false,
            ymin: DEFAULT_YMIN,
            ymax: DEFAULT_YMAX,
            save: None,
            delimiter: Delimiter::Comma.to_string(),
        }
    }
}

impl Settings {
    /// Load defaults, the optional config file and `PTP_PLOT_*` variables.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(config_file, Environment::with_prefix(ENV_PREFIX))
    }

    /// Same as [`Settings::load`] with an explicit environment source.
    pub fn load_with_env(
        config_file: Option<&Path>,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("all", defaults.all)?
            .set_default("type", defaults.metric)?
            .set_default("start", defaults.start)?
            .set_default("end", defaults.end)?
            .set_default("roll", defaults.roll)?
            .set_default("print", defaults.print)?
            .set_default("ymin", defaults.ymin)?
            .set_default("ymax", defaults.ymax)?
            .set_default("delimiter", defaults.delimiter)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()
    }
}

/// Validated configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub logfile: Option<PathBuf>,
    pub metric: Metric,
    pub all: bool,
    pub start: NaiveTime,
    pub end: NaiveTime,
    /// `start` exactly as configured, for labels.
    pub start_text: String,
    /// `end` exactly as configured, for labels.
    pub end_text: String,
    pub roll: i64,
    pub print: bool,
    pub ymin: f64,
    pub ymax: f64,
    pub save: Option<PathBuf>,
    pub delimiter: Delimiter,
}

impl TryFrom<Settings> for PlotConfig {
    type Error = PlotError;

    fn try_from(settings: Settings) -> Result<Self, Self::Error> {
        let metric = settings.metric.parse::<Metric>()?;
        let start = parse_time_of_day("start", &settings.start)?;
        let end = parse_time_of_day("end", &settings.end)?;
        let delimiter = settings.delimiter.parse::<Delimiter>()?;

        if settings.ymin.partial_cmp(&settings.ymax) != Some(Ordering::Less) {
            return Err(PlotError::usage(format!(
                "ymin ({}) must be below ymax ({})",
                settings.ymin, settings.ymax
            )));
        }

        Ok(Self {
            logfile: settings.logfile,
            metric,
            all: settings.all,
            start,
            end,
            start_text: settings.start,
            end_text: settings.end,
            roll: settings.roll,
            print: settings.print,
            ymin: settings.ymin,
            ymax: settings.ymax,
            save: settings.save,
            delimiter,
        })
    }
}

impl PlotConfig {
    /// Window selection for the export pass.
    pub fn window_mode(&self) -> WindowMode {
        if self.all {
            WindowMode::All
        } else {
            WindowMode::Bounded {
                start: self.start,
                end: self.end,
                roll: self.roll,
            }
        }
    }

    /// Where to render the PNG, if image output was requested.
    ///
    /// The image always lands next to the log as `<logfile>-<type>.png`.
    pub fn image_path(&self) -> Option<PathBuf> {
        if !self.print {
            return None;
        }
        let stem = self
            .logfile
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "ptp".to_string());
        Some(PathBuf::from(format!("{}-{}.png", stem, self.metric)))
    }

    /// `start` as configured, before parsing.
    pub fn start_label(&self) -> &str {
        &self.start_text
    }

    /// `end` as configured, before parsing.
    pub fn end_label(&self) -> &str {
        &self.end_text
    }
}

fn parse_time_of_day(name: &str, value: &str) -> Result<NaiveTime, PlotError> {
    NaiveTime::parse_from_str(value.trim(), TIME_OF_DAY_FORMAT).map_err(|_| {
        PlotError::usage(format!(
            "Invalid {} time {:?}, expected HH:MM:SS",
            name, value
        ))
    })
}
