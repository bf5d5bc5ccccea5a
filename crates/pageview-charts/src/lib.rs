//! Chart rendering for the page view visualizer.
//!
//! Each renderer takes the cleaned [`PageViewTable`](pageview_core::models::PageViewTable)
//! explicitly and writes one PNG into an output directory. Drawing goes
//! through [`backend::FontSafeBackend`] so that a missing font falls back to
//! built-in bitmap glyphs instead of aborting the chart.

pub mod backend;
pub mod bar_chart;
pub mod box_plot;
pub mod chart;
mod glyphs;
pub mod line_chart;
pub mod themes;

#[cfg(test)]
mod fixtures;

pub use backend::{register_chart_font, try_register_font};
pub use chart::{render_charts, ChartKind};
pub use pageview_core as core;
