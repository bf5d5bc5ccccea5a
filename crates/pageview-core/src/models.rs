use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily observation: the page views recorded on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageViewRecord {
    pub date: NaiveDate,
    pub value: f64,
}

impl PageViewRecord {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Date-indexed page view series.
///
/// Records are always held in ascending date order. The sort is stable, so
/// duplicate dates keep the order they were supplied in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageViewTable {
    records: Vec<PageViewRecord>,
}

impl PageViewTable {
    /// Build a table from `records`, sorting them by date.
    pub fn new(mut records: Vec<PageViewRecord>) -> Self {
        records.sort_by_key(|r| r.date);
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PageViewRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PageViewRecord> {
        self.records.iter()
    }

    /// Values in date order.
    pub fn values(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.value).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.records.first().map(|r| r.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.records.last().map(|r| r.date)
    }

    /// Smallest value in the table, or `None` when empty.
    pub fn min_value(&self) -> Option<f64> {
        self.records.iter().map(|r| r.value).min_by(f64::total_cmp)
    }

    /// Largest value in the table, or `None` when empty.
    pub fn max_value(&self) -> Option<f64> {
        self.records.iter().map(|r| r.value).max_by(f64::total_cmp)
    }

    /// A new table holding only the records for which `keep` returns `true`.
    pub fn filtered(&self, keep: impl Fn(&PageViewRecord) -> bool) -> Self {
        // Filtering preserves order, so no re-sort is needed.
        Self {
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a PageViewTable {
    type Item = &'a PageViewRecord;
    type IntoIter = std::slice::Iter<'a, PageViewRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Average of all values falling in one calendar month of one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub year: i32,
    /// Calendar month, `1..=12`.
    pub month: u32,
    pub mean: f64,
    /// Number of daily observations averaged.
    pub count: usize,
}

/// Monthly means pivoted so that each year is a row and each month a column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyPivot {
    /// Years in ascending order.
    pub years: Vec<i32>,
    /// `rows[i][m]` is the mean for `years[i]` in month `m + 1`.
    pub rows: Vec<[Option<f64>; 12]>,
}

impl MonthlyPivot {
    /// Whether any year has data for the zero-based month `month_index`.
    pub fn has_month(&self, month_index: usize) -> bool {
        self.rows
            .iter()
            .any(|row| row.get(month_index).copied().flatten().is_some())
    }

    /// Smallest mean across the pivot.
    pub fn min_mean(&self) -> Option<f64> {
        self.rows
            .iter()
            .flat_map(|row| row.iter().flatten().copied())
            .min_by(f64::total_cmp)
    }

    /// Largest mean across the pivot.
    pub fn max_mean(&self) -> Option<f64> {
        self.rows
            .iter()
            .flat_map(|row| row.iter().flatten().copied())
            .max_by(f64::total_cmp)
    }
}
