use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, VisualizerError};
use crate::stats::PercentileBand;

/// Default input file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "fcc-forum-pageviews.csv";
/// Default lower quantile of the outlier band.
pub const DEFAULT_LOWER_QUANTILE: f64 = 0.025;
/// Default upper quantile of the outlier band.
pub const DEFAULT_UPPER_QUANTILE: f64 = 0.975;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Clean a daily page view series and draw line, bar and box charts
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pageview-visualizer",
    about = "Clean a daily page view series and draw line, bar and box charts",
    version
)]
pub struct Settings {
    /// CSV file with `date` and `value` columns
    #[arg(long, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Directory the PNG charts are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Lower quantile of the retained band (0-1)
    #[arg(long, default_value_t = DEFAULT_LOWER_QUANTILE)]
    pub lower_quantile: f64,

    /// Upper quantile of the retained band (0-1)
    #[arg(long, default_value_t = DEFAULT_UPPER_QUANTILE)]
    pub upper_quantile: f64,

    /// Charts to render
    #[arg(
        long,
        value_delimiter = ',',
        default_values = ["line", "bar", "box"],
        value_parser = ["line", "bar", "box"]
    )]
    pub charts: Vec<String>,

    /// TrueType font used for chart text (auto-detected if not specified)
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse the process arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::load_from_args(std::env::args_os())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn load_from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let mut settings = Settings::parse_from(args);
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }

    /// The outlier band selected on the command line.
    pub fn band(&self) -> Result<PercentileBand> {
        PercentileBand::new(self.lower_quantile, self.upper_quantile)
    }

    /// Reject quantile bands and chart lists that cannot produce output.
    pub fn validate(&self) -> Result<()> {
        self.band()?;
        if self.charts.is_empty() {
            return Err(VisualizerError::Config(
                "at least one chart must be requested".to_string(),
            ));
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
