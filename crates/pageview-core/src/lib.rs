//! Shared domain layer for the page view visualizer.
//!
//! Holds the date-indexed table types, the error taxonomy, order statistics,
//! calendar and label helpers, and the command-line settings.

pub mod calendar;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod stats;

pub use error::{Result, VisualizerError};
