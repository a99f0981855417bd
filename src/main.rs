use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use ptp_plot::{export_log, plot, PlotConfig, PlotRequest, Settings};

#[derive(Parser, Debug)]
#[command(name = "ptp-plot", version)]
#[command(about = "Plot PTP delays or offsets reported by the slave")]
struct Args {
    /// Show all entries instead of the start/end window
    #[arg(short, long)]
    all: bool,

    /// Plot the delay or offset [default: delay]
    #[arg(short = 't', long = "type", value_name = "delay|offset")]
    metric: Option<String>,

    /// Log file to use
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    logfile: Option<PathBuf>,

    /// Start time [default: 09:30:00]
    #[arg(short, long, value_name = "HH:MM:SS")]
    start: Option<String>,

    /// End time [default: 16:30:00]
    #[arg(short, long, value_name = "HH:MM:SS")]
    end: Option<String>,

    /// Number of days to roll at the start [default: 0]
    #[arg(short, long, allow_negative_numbers = true)]
    roll: Option<i64>,

    /// Print the graph to <logfile>-<type>.png (a PATH value is accepted but ignored)
    #[arg(short, long = "print", value_name = "PATH", value_hint = ValueHint::FilePath)]
    print: Option<Option<PathBuf>>,

    /// Minimum y value [default: 0.000000]
    #[arg(short = 'y', long, allow_negative_numbers = true)]
    ymin: Option<f64>,

    /// Maximum y value [default: 0.001000]
    #[arg(short = 'Y', long, allow_negative_numbers = true)]
    ymax: Option<f64>,

    /// Also save the plotted "<timestamp> <value>" pairs to this file
    #[arg(short = 'S', long, value_hint = ValueHint::FilePath)]
    save: Option<PathBuf>,

    /// Field delimiter of the log (comma or tab) [default: comma]
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Config file with option defaults (TOML, YAML, JSON, ...)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,
}

impl Args {
    /// Command-line flags take precedence over file and environment values.
    fn apply(self, settings: &mut Settings) {
        if self.all {
            settings.all = true;
        }
        if let Some(metric) = self.metric {
            settings.metric = metric;
        }
        if let Some(logfile) = self.logfile {
            settings.logfile = Some(logfile);
        }
        if let Some(start) = self.start {
            settings.start = start;
        }
        if let Some(end) = self.end {
            settings.end = end;
        }
        if let Some(roll) = self.roll {
            settings.roll = roll;
        }
        if let Some(print) = self.print {
            if let Some(path) = print {
                warn!(path = %path.display(), "Ignoring --print path, image is named after the log");
            }
            settings.print = true;
        }
        if let Some(ymin) = self.ymin {
            settings.ymin = ymin;
        }
        if let Some(ymax) = self.ymax {
            settings.ymax = ymax;
        }
        if let Some(save) = self.save {
            settings.save = Some(save);
        }
        if let Some(delimiter) = self.delimiter {
            settings.delimiter = delimiter;
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing - RUST_LOG takes precedence, fallback to warn
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(args)?;
    debug!(?config, "Resolved configuration");

    run(&config)
}

/// Layer defaults, config file, environment and flags, then validate.
fn load_config(args: Args) -> Result<PlotConfig> {
    let mut settings =
        Settings::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply(&mut settings);
    Ok(PlotConfig::try_from(settings)?)
}

/// Export the log window and hand it to the plotter.
fn run(config: &PlotConfig) -> Result<()> {
    // Removed when dropped, however the plot ends
    let mut transient =
        NamedTempFile::new().context("Failed to create temporary data file")?;

    let summary = export_log(config, transient.as_file_mut())?;
    if let Some(window) = summary.window {
        info!(start = %window.start, end = %window.end, "Window");
    }

    let request = PlotRequest::new(config, &summary, transient.path());
    plot::render(&request)?;

    if let Some(path) = &request.export {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ptp_plot::Metric;

    fn settings_from(argv: &[&str]) -> Settings {
        let args = Args::try_parse_from(argv).unwrap();
        let mut settings = Settings::default();
        args.apply(&mut settings);
        settings
    }

    #[test]
    fn test_no_flags_keep_defaults() {
        assert_eq!(settings_from(&["ptp-plot"]), Settings::default());
    }

    #[test]
    fn test_short_flags() {
        let settings = settings_from(&[
            "ptp-plot", "-a", "-t", "offset", "-l", "slave.log", "-s", "08:00:00", "-e",
            "18:00:00", "-r", "-1", "-y", "-0.0005", "-Y", "0.0005", "-S", "out.dat",
        ]);
        assert!(settings.all);
        assert_eq!(settings.metric, "offset");
        assert_eq!(settings.logfile, Some(PathBuf::from("slave.log")));
        assert_eq!(settings.start, "08:00:00");
        assert_eq!(settings.end, "18:00:00");
        assert_eq!(settings.roll, -1);
        assert_eq!(settings.ymin, -0.0005);
        assert_eq!(settings.ymax, 0.0005);
        assert_eq!(settings.save, Some(PathBuf::from("out.dat")));

        let config = PlotConfig::try_from(settings).unwrap();
        assert_eq!(config.metric, Metric::Offset);
    }

    #[test]
    fn test_bare_print_uses_log_name() {
        let settings = settings_from(&["ptp-plot", "--logfile", "slave.log", "--print"]);
        assert!(settings.print);
        let config = PlotConfig::try_from(settings).unwrap();
        assert_eq!(config.image_path(), Some(PathBuf::from("slave.log-delay.png")));
    }

    #[test]
    fn test_print_path_value_is_ignored() {
        let settings = settings_from(&["ptp-plot", "-l", "slave.log", "-t", "offset", "-p", "chart.png"]);
        assert!(settings.print);
        let config = PlotConfig::try_from(settings).unwrap();
        assert_eq!(config.image_path(), Some(PathBuf::from("slave.log-offset.png")));
    }

    #[test]
    fn test_flags_override_loaded_settings() {
        let args = Args::try_parse_from(["ptp-plot", "--type", "delay"]).unwrap();
        let mut settings = Settings {
            metric: "offset".to_string(),
            roll: 4,
            ..Settings::default()
        };
        args.apply(&mut settings);
        assert_eq!(settings.metric, "delay");
        assert_eq!(settings.roll, 4);
    }

    #[test]
    fn test_invalid_type_is_rejected() {
        let settings = settings_from(&["ptp-plot", "--type", "jitter"]);
        let err = PlotConfig::try_from(settings).unwrap_err();
        assert_eq!(err.to_string(), "You must choose either delay or offset.");
    }
}
