//! Order statistics over page view samples.

use crate::error::{Result, VisualizerError};
use crate::settings::{DEFAULT_LOWER_QUANTILE, DEFAULT_UPPER_QUANTILE};

// ── Percentile helpers ────────────────────────────────────────────────────────

/// Value at percentile `p` (0-100) of an ascending slice.
///
/// The rank `p / 100 * (n - 1)` is clamped to the slice and the value is
/// interpolated between its two neighbouring observations. An empty slice
/// gives `0.0`.
pub fn percentile(sorted_data: &[f64], p: f64) -> f64 {
    let Some(last) = sorted_data.len().checked_sub(1) else {
        return 0.0;
    };
    let rank = (p / 100.0).clamp(0.0, 1.0) * last as f64;
    let below = (rank.floor() as usize).min(last);
    let above = (below + 1).min(last);
    let weight = rank - below as f64;
    let base = sorted_data[below];
    base + weight * (sorted_data[above] - base)
}

/// Quantile `q` (in `[0, 1]`) of an unsorted sample.
///
/// Returns `None` for an empty sample.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted_copy(values);
    Some(percentile(&sorted, q * 100.0))
}

/// Arithmetic mean, or `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v
}

// ── PercentileBand ────────────────────────────────────────────────────────────

/// Inclusive quantile band, both ends expressed in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileBand {
    pub lower: f64,
    pub upper: f64,
}

impl Default for PercentileBand {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_QUANTILE,
            upper: DEFAULT_UPPER_QUANTILE,
        }
    }
}

impl PercentileBand {
    /// Build a band, rejecting quantiles outside `[0, 1]` or `lower >= upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        for (name, q) in [("lower quantile", lower), ("upper quantile", upper)] {
            if !(0.0..=1.0).contains(&q) {
                return Err(VisualizerError::Config(format!(
                    "{name} must be within [0, 1], got {q}"
                )));
            }
        }
        if lower >= upper {
            return Err(VisualizerError::Config(format!(
                "lower quantile ({lower}) must be below upper quantile ({upper})"
            )));
        }
        Ok(Self { lower, upper })
    }

    /// Value bounds of this band over `values`, or `None` when empty.
    pub fn bounds(&self, values: &[f64]) -> Option<(f64, f64)> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);
        Some((
            percentile(&sorted, self.lower * 100.0),
            percentile(&sorted, self.upper * 100.0),
        ))
    }
}

// ── BoxStats ──────────────────────────────────────────────────────────────────

/// Multiplier applied to the IQR to place the whisker fences.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Five-number summary plus fliers for one box in a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Smallest observation at or above `q1 - 1.5 * IQR`.
    pub whisker_low: f64,
    /// Largest observation at or below `q3 + 1.5 * IQR`.
    pub whisker_high: f64,
    /// Observations outside the whiskers, ascending.
    pub outliers: Vec<f64>,
    pub count: usize,
}

impl BoxStats {
    /// Summarise `values`. Returns `None` for an empty sample.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let sorted = sorted_copy(values);

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let low_fence = q1 - WHISKER_IQR_FACTOR * iqr;
        let high_fence = q3 + WHISKER_IQR_FACTOR * iqr;

        let inside = sorted
            .iter()
            .copied()
            .filter(|v| *v >= low_fence && *v <= high_fence);
        // The quartiles always lie inside the fences, so `inside` is never
        // empty for a non-empty sample; fall back to the quartiles anyway.
        let whisker_low = inside.clone().next().unwrap_or(q1);
        let whisker_high = inside.last().unwrap_or(q3);

        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < whisker_low || *v > whisker_high)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            outliers,
            count: sorted.len(),
        })
    }

    /// Inter-quartile range.
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Lowest point drawn for this box, fliers included.
    pub fn lower_extent(&self) -> f64 {
        self.outliers
            .first()
            .copied()
            .unwrap_or(self.whisker_low)
            .min(self.whisker_low)
    }

    /// Highest point drawn for this box, fliers included.
    pub fn upper_extent(&self) -> f64 {
        self.outliers
            .last()
            .copied()
            .unwrap_or(self.whisker_high)
            .max(self.whisker_high)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
