use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the page view visualizer.
#[derive(Error, Debug)]
pub enum VisualizerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the CSV header.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A `date` field did not match any recognised format.
    #[error("Invalid date on row {row}: {value}")]
    DateParse { row: usize, value: String },

    /// A `value` field is not a finite number.
    #[error("Invalid value on row {row}: {value}")]
    ValueParse { row: usize, value: String },

    /// The input holds no data rows.
    #[error("No data rows in {0}")]
    EmptyDataset(String),

    /// A chart could not be drawn or written.
    #[error("Failed to render {chart}: {message}")]
    Render { chart: String, message: String },

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the visualizer crates.
pub type Result<T> = std::result::Result<T, VisualizerError>;
