use std::fmt;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use pageview_core::error::{Result, VisualizerError};
use pageview_core::models::PageViewTable;
use tracing::info;

use crate::{bar_chart, box_plot, line_chart};

// ── ChartKind ─────────────────────────────────────────────────────────────────

/// The three charts the visualizer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Bar,
    Box,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Line, ChartKind::Bar, ChartKind::Box];

    /// Output file name, written inside the output directory.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::Line => "line_plot.png",
            ChartKind::Bar => "bar_plot.png",
            ChartKind::Box => "box_plot.png",
        }
    }

    /// Image size in pixels (figure inches at 100 dpi).
    pub fn size(self) -> (u32, u32) {
        match self {
            ChartKind::Line => (2400, 800),
            ChartKind::Bar => (900, 675),
            ChartKind::Box => (2000, 600),
        }
    }

    pub fn output_path(self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name())
    }

    /// Render this chart of `table` into `output_dir`.
    pub fn render(self, table: &PageViewTable, output_dir: &Path) -> Result<PathBuf> {
        match self {
            ChartKind::Line => line_chart::draw_line_plot(table, output_dir),
            ChartKind::Bar => bar_chart::draw_bar_plot(table, output_dir),
            ChartKind::Box => box_plot::draw_box_plot(table, output_dir),
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Box => "box",
        };
        f.write_str(name)
    }
}

impl FromStr for ChartKind {
    type Err = VisualizerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "box" => Ok(ChartKind::Box),
            other => Err(VisualizerError::Config(format!("Unknown chart: {other}"))),
        }
    }
}

// ── Rendering entry point ─────────────────────────────────────────────────────

/// Render each of `kinds` in order, returning the written paths.
///
/// Stops at the first chart that fails.
pub fn render_charts(
    table: &PageViewTable,
    output_dir: &Path,
    kinds: &[ChartKind],
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(kinds.len());
    for kind in kinds {
        let path = kind.render(table, output_dir)?;
        info!("Wrote {} chart to {}", kind, path.display());
        written.push(path);
    }
    Ok(written)
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// Charts refuse to draw an empty table.
pub(crate) fn ensure_not_empty(table: &PageViewTable, kind: ChartKind) -> Result<()> {
    if table.is_empty() {
        return Err(VisualizerError::EmptyDataset(format!("{kind} chart input")));
    }
    Ok(())
}

pub(crate) fn render_error(kind: ChartKind, err: anyhow::Error) -> VisualizerError {
    VisualizerError::Render {
        chart: kind.file_name().to_string(),
        message: format!("{err:#}"),
    }
}

/// Share of the data span added above and below the plotted values.
const AXIS_MARGIN: f64 = 0.05;

/// Y-axis range covering `lo..=hi` with a small margin on both sides.
///
/// With `from_zero` the range always contains zero and gets no margin on the
/// zero side, for bars that grow out of the axis. Degenerate or non-finite
/// input still yields a usable range.
pub(crate) fn value_axis(lo: f64, hi: f64, from_zero: bool) -> Range<f64> {
    let (lo, hi) = if lo.is_finite() && hi.is_finite() && lo <= hi {
        (lo, hi)
    } else {
        (0.0, 0.0)
    };

    if from_zero {
        let (lo, hi) = (lo.min(0.0), hi.max(0.0));
        let pad = (hi - lo) * AXIS_MARGIN;
        let start = if lo < 0.0 { lo - pad } else { 0.0 };
        let end = if hi > 0.0 { hi + pad } else { 0.0 };
        return if end > start { start..end } else { 0.0..1.0 };
    }

    let span = hi - lo;
    let pad = if span > 0.0 {
        span * AXIS_MARGIN
    } else {
        lo.abs().max(1.0) * AXIS_MARGIN
    };
    (lo - pad)..(hi + pad)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
