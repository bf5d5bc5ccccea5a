//! Data layer for the page view visualizer.
//!
//! Responsible for reading the `date,value` CSV, removing percentile-band
//! outliers, and deriving the calendar groupings the charts consume.

pub mod aggregator;
pub mod cleaner;
pub mod reader;

pub use pageview_core as core;
