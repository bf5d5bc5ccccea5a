//! Percentile-band outlier removal.
//!
//! Bounds are computed once over the full, unfiltered series; every row whose
//! value lies inside the inclusive band is retained.

use pageview_core::models::PageViewTable;
use tracing::{debug, info};

pub use pageview_core::stats::PercentileBand;

// ── CleanReport ───────────────────────────────────────────────────────────────

/// Output of [`remove_outliers`].
#[derive(Debug, Clone)]
pub struct CleanReport {
    /// Rows inside the band, still in date order.
    pub table: PageViewTable,
    /// Value at the lower quantile of the original series.
    pub lower_bound: f64,
    /// Value at the upper quantile of the original series.
    pub upper_bound: f64,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl CleanReport {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Drop rows whose value falls outside `band` of the original distribution.
///
/// An empty table passes through unchanged with both bounds set to `0.0`.
pub fn remove_outliers(table: &PageViewTable, band: PercentileBand) -> CleanReport {
    let rows_before = table.len();
    let Some((lower_bound, upper_bound)) = band.bounds(&table.values()) else {
        return CleanReport {
            table: table.clone(),
            lower_bound: 0.0,
            upper_bound: 0.0,
            rows_before,
            rows_after: rows_before,
        };
    };

    debug!(
        "Percentile band {:.3}..={:.3} maps to values {:.2}..={:.2}",
        band.lower, band.upper, lower_bound, upper_bound
    );

    let cleaned = table.filtered(|r| r.value >= lower_bound && r.value <= upper_bound);
    let rows_after = cleaned.len();

    info!(
        "Removed {} of {} rows outside [{:.2}, {:.2}]",
        rows_before - rows_after,
        rows_before,
        lower_bound,
        upper_bound
    );

    CleanReport {
        table: cleaned,
        lower_bound,
        upper_bound,
        rows_before,
        rows_after,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
