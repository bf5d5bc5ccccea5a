//! Synthetic page view series shared by the renderer tests.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};
use pageview_core::models::{PageViewRecord, PageViewTable};

/// Roughly three and a half years of daily values with growth, a yearly
/// cycle and a few spikes.
pub(crate) fn sample_table() -> PageViewTable {
    let start = NaiveDate::from_ymd_opt(2016, 5, 9).unwrap();
    let records = (0..1300)
        .map(|i| {
            let t = i as f64;
            let trend = 20_000.0 + t * 60.0;
            let season = 15_000.0 * (t / 365.0 * std::f64::consts::TAU).sin();
            let spike = if i % 113 == 0 { 120_000.0 } else { 0.0 };
            PageViewRecord::new(start + Duration::days(i), trend + season + spike)
        })
        .collect();
    PageViewTable::new(records)
}

/// Write [`sample_table`] as a `date,value` CSV into `dir`.
pub(crate) fn write_sample_csv(dir: &Path) -> PathBuf {
    let mut body = String::from("date,value\n");
    for record in &sample_table() {
        writeln!(body, "{},{:.0}", record.date.format("%Y-%m-%d"), record.value).unwrap();
    }
    let path = dir.join("fcc-forum-pageviews.csv");
    std::fs::write(&path, body).unwrap();
    path
}
