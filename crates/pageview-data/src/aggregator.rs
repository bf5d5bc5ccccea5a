//! Calendar groupings of a page view table.
//!
//! Every grouping here is a transient view derived from a [`PageViewTable`];
//! the table itself is never modified.

use std::collections::BTreeMap;

use pageview_core::calendar::year_month;
use pageview_core::models::{MonthlyMean, MonthlyPivot, PageViewTable};
use pageview_core::stats::{BoxStats, mean};

// ── Monthly means ─────────────────────────────────────────────────────────────

/// Average value per `(year, month)` present in `table`, ascending by key.
pub fn monthly_means(table: &PageViewTable) -> Vec<MonthlyMean> {
    let mut groups: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for record in table {
        groups
            .entry(year_month(record.date))
            .or_default()
            .push(record.value);
    }

    groups
        .into_iter()
        .filter_map(|((year, month), values)| {
            Some(MonthlyMean {
                year,
                month,
                mean: mean(&values)?,
                count: values.len(),
            })
        })
        .collect()
}

/// Pivot monthly means into one row per year and one column per month.
pub fn pivot_monthly(means: &[MonthlyMean]) -> MonthlyPivot {
    let mut rows: BTreeMap<i32, [Option<f64>; 12]> = BTreeMap::new();
    for m in means {
        let Some(slot) = (m.month as usize).checked_sub(1).filter(|i| *i < 12) else {
            continue;
        };
        rows.entry(m.year).or_insert([None; 12])[slot] = Some(m.mean);
    }

    let (years, rows) = rows.into_iter().unzip();
    MonthlyPivot { years, rows }
}

// ── Distribution groups ───────────────────────────────────────────────────────

/// A labelled group of values feeding one box in a box plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueGroup {
    pub label: String,
    pub values: Vec<f64>,
}

impl ValueGroup {
    /// Box statistics for this group, `None` when it holds no values.
    pub fn box_stats(&self) -> Option<BoxStats> {
        BoxStats::from_values(&self.values)
    }
}

/// Values grouped by calendar year, ascending.
pub fn group_by_year(table: &PageViewTable) -> Vec<ValueGroup> {
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for record in table {
        groups
            .entry(year_month(record.date).0)
            .or_default()
            .push(record.value);
    }

    groups
        .into_iter()
        .map(|(year, values)| ValueGroup {
            label: year.to_string(),
            values,
        })
        .collect()
}

/// Values grouped by calendar month, always twelve groups in Jan..Dec order.
///
/// Months without data are kept as empty groups so their slot stays in place.
pub fn group_by_month(table: &PageViewTable) -> Vec<ValueGroup> {
    let mut buckets: [Vec<f64>; 12] = Default::default();
    for record in table {
        let month = year_month(record.date).1 as usize;
        buckets[month - 1].push(record.value);
    }

    pageview_core::calendar::month_abbrevs()
        .into_iter()
        .zip(buckets)
        .map(|(label, values)| ValueGroup {
            label: label.to_string(),
            values,
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pageview_core::models::PageViewRecord;
    use std::collections::HashSet;

    fn rec(y: i32, m: u32, d: u32, v: f64) -> PageViewRecord {
        PageViewRecord::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), v)
    }

    fn sample_table() -> PageViewTable {
        PageViewTable::new(vec![
            rec(2017, 2, 3, 40.0),
            rec(2016, 5, 9, 10.0),
            rec(2016, 5, 10, 20.0),
            rec(2016, 12, 31, 30.0),
            rec(2017, 2, 1, 60.0),
            rec(2017, 5, 1, 5.0),
        ])
    }

    // ── monthly_means ─────────────────────────────────────────────────────────

    #[test]
    fn test_monthly_means_one_row_per_year_month() {
        let table = sample_table();
        let means = monthly_means(&table);

        let present: HashSet<(i32, u32)> = table.iter().map(|r| year_month(r.date)).collect();
        assert_eq!(means.len(), present.len());

        let keys: Vec<(i32, u32)> = means.iter().map(|m| (m.year, m.month)).collect();
        assert_eq!(keys, vec![(2016, 5), (2016, 12), (2017, 2), (2017, 5)]);
    }

    #[test]
    fn test_monthly_means_values() {
        let means = monthly_means(&sample_table());
        assert_eq!(means[0].mean, 15.0);
        assert_eq!(means[0].count, 2);
        assert_eq!(means[2].mean, 50.0);
        assert_eq!(means[3].mean, 5.0);
    }

    #[test]
    fn test_monthly_means_empty() {
        assert!(monthly_means(&PageViewTable::default()).is_empty());
    }

    // ── pivot_monthly ─────────────────────────────────────────────────────────

    #[test]
    fn test_pivot_rows_by_year_columns_by_month() {
        let pivot = pivot_monthly(&monthly_means(&sample_table()));

        assert_eq!(pivot.years, vec![2016, 2017]);
        assert_eq!(pivot.rows[0][4], Some(15.0));
        assert_eq!(pivot.rows[0][11], Some(30.0));
        assert_eq!(pivot.rows[0][0], None);
        assert_eq!(pivot.rows[1][1], Some(50.0));
        assert_eq!(pivot.rows[1][4], Some(5.0));

        let cells = pivot
            .rows
            .iter()
            .flat_map(|r| r.iter())
            .filter(|c| c.is_some())
            .count();
        assert_eq!(cells, 4);
    }

    #[test]
    fn test_pivot_ignores_invalid_months() {
        let means = vec![MonthlyMean {
            year: 2016,
            month: 0,
            mean: 1.0,
            count: 1,
        }];
        let pivot = pivot_monthly(&means);
        assert!(pivot.years.is_empty());
    }

    // ── group_by_year ─────────────────────────────────────────────────────────

    #[test]
    fn test_group_by_year() {
        let groups = group_by_year(&sample_table());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["2016", "2017"]);
        assert_eq!(groups[0].values, vec![10.0, 20.0, 30.0]);
        assert_eq!(groups[1].values.len(), 3);
    }

    // ── group_by_month ────────────────────────────────────────────────────────

    #[test]
    fn test_group_by_month_fixed_calendar_order() {
        // December first, then February: order must still be Jan..Dec.
        let table = PageViewTable::new(vec![
            rec(2016, 12, 1, 1.0),
            rec(2017, 2, 1, 2.0),
            rec(2018, 7, 1, 3.0),
        ]);
        let groups = group_by_month(&table);
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"]
        );
        assert_eq!(groups[1].values, vec![2.0]);
        assert_eq!(groups[6].values, vec![3.0]);
        assert_eq!(groups[11].values, vec![1.0]);
        assert!(groups[0].values.is_empty());
        assert!(groups[0].box_stats().is_none());
    }

    #[test]
    fn test_group_by_month_pools_years() {
        let groups = group_by_month(&sample_table());
        assert_eq!(groups[4].values, vec![10.0, 20.0, 5.0]);
        let stats = groups[4].box_stats().unwrap();
        assert_eq!(stats.median, 10.0);
    }
}
