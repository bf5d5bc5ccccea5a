//! CSV loading for daily page view series.
//!
//! Reads a `date,value` CSV into a [`PageViewTable`] sorted by date. Extra
//! columns are ignored; the two required columns may appear in any order.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use pageview_core::error::{Result, VisualizerError};
use pageview_core::models::{PageViewRecord, PageViewTable};
use serde::Deserialize;
use tracing::{debug, info};

/// Name of the date column.
pub const DATE_COLUMN: &str = "date";
/// Name of the value column.
pub const VALUE_COLUMN: &str = "value";

/// Date-only layouts tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

// ── Public API ────────────────────────────────────────────────────────────────

/// Load the CSV at `path` into a date-sorted table.
pub fn load_page_views(path: &Path) -> Result<PageViewTable> {
    let file = std::fs::File::open(path).map_err(|source| VisualizerError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let table = read_page_views(file).map_err(|e| match e {
        VisualizerError::EmptyDataset(_) => {
            VisualizerError::EmptyDataset(path.display().to_string())
        }
        other => other,
    })?;

    info!("Loaded {} rows from {}", table.len(), path.display());
    Ok(table)
}

/// Parse CSV text from any reader into a date-sorted table.
///
/// Row numbers in errors are 1-based and count data rows only.
pub fn read_page_views<R: Read>(input: R) -> Result<PageViewTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    for column in [DATE_COLUMN, VALUE_COLUMN] {
        if !headers.iter().any(|h| h == column) {
            return Err(VisualizerError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = idx + 1;
        let raw: RawRow = result?.deserialize(Some(&headers))?;
        records.push(raw.into_record(row)?);
    }

    if records.is_empty() {
        return Err(VisualizerError::EmptyDataset("input".to_string()));
    }

    let table = PageViewTable::new(records);
    debug!(
        "Parsed {} rows spanning {:?}..={:?}",
        table.len(),
        table.first_date(),
        table.last_date()
    );
    Ok(table)
}

/// Parse a calendar date in any of the accepted layouts.
///
/// Timestamps such as `2016-05-09T00:00:00Z` or `2016-05-09 13:00:00` keep
/// only their date part.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    // Leading ISO date followed by a time component.
    let (head, tail) = (s.get(..10)?, s.get(10..)?);
    if tail.starts_with('T') || tail.starts_with(' ') {
        return NaiveDate::parse_from_str(head, "%Y-%m-%d").ok();
    }
    None
}

// ── Internal helpers ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawRow {
    date: String,
    value: String,
}

impl RawRow {
    fn into_record(self, row: usize) -> Result<PageViewRecord> {
        let date = parse_date(&self.date).ok_or_else(|| VisualizerError::DateParse {
            row,
            value: self.date.clone(),
        })?;

        let value = self
            .value
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or(VisualizerError::ValueParse {
                row,
                value: self.value,
            })?;

        Ok(PageViewRecord::new(date, value))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn write_csv(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", body).unwrap();
        path
    }

    // ── parse_date ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2016-05-09"), Some(date(2016, 5, 9)));
        assert_eq!(parse_date("2016/05/09"), Some(date(2016, 5, 9)));
        assert_eq!(parse_date("05/09/2016"), Some(date(2016, 5, 9)));
        assert_eq!(parse_date(" 2019-12-03 "), Some(date(2019, 12, 3)));
    }

    #[test]
    fn test_parse_date_with_time_component() {
        assert_eq!(parse_date("2016-05-09T00:00:00Z"), Some(date(2016, 5, 9)));
        assert_eq!(parse_date("2016-05-09 13:45:00"), Some(date(2016, 5, 9)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date("2016-13-01"), None);
        assert_eq!(parse_date("2016-05-09X"), None);
    }

    // ── read_page_views ───────────────────────────────────────────────────────

    #[test]
    fn test_read_basic() {
        let csv = "date,value\n2016-05-09,1201\n2016-05-10,2329\n";
        let table = read_page_views(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.values(), vec![1201.0, 2329.0]);
        assert_eq!(table.first_date(), Some(date(2016, 5, 9)));
    }

    #[test]
    fn test_read_sorts_unsorted_input() {
        let csv = "date,value\n2017-01-01,3\n2016-01-01,1\n2016-06-01,2\n";
        let table = read_page_views(csv.as_bytes()).unwrap();
        assert_eq!(table.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_read_column_order_and_extra_columns() {
        let csv = "value, note ,date\n10,first,2016-01-02\n20,second,2016-01-01\n";
        let table = read_page_views(csv.as_bytes()).unwrap();
        assert_eq!(table.values(), vec![20.0, 10.0]);
    }

    #[test]
    fn test_read_missing_value_column() {
        let csv = "date,views\n2016-01-01,1\n";
        let err = read_page_views(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, VisualizerError::MissingColumn(ref c) if c == "value"));
    }

    #[test]
    fn test_read_missing_date_column() {
        let csv = "day,value\n2016-01-01,1\n";
        let err = read_page_views(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, VisualizerError::MissingColumn(ref c) if c == "date"));
    }

    #[test]
    fn test_read_bad_date_reports_row() {
        let csv = "date,value\n2016-01-01,1\nnot-a-date,2\n";
        let err = read_page_views(csv.as_bytes()).unwrap_err();
        match err {
            VisualizerError::DateParse { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not-a-date");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_bad_value_reports_row() {
        let csv = "date,value\n2016-01-01,1\n2016-01-02,2\n2016-01-03,NaN\n";
        let err = read_page_views(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, VisualizerError::ValueParse { row: 3, .. }));
    }

    #[test]
    fn test_read_header_only_is_empty_dataset() {
        let err = read_page_views("date,value\n".as_bytes()).unwrap_err();
        assert!(matches!(err, VisualizerError::EmptyDataset(_)));
    }

    // ── load_page_views ───────────────────────────────────────────────────────

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .serialize(PageViewRecord::new(date(2018, 2, 1), 42.0))
            .unwrap();
        writer
            .serialize(PageViewRecord::new(date(2018, 1, 1), 7.0))
            .unwrap();
        let body = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let path = write_csv(dir.path(), "views.csv", &body);

        let table = load_page_views(&path).unwrap();
        assert_eq!(table.values(), vec![7.0, 42.0]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");
        let err = load_page_views(&path).unwrap_err();
        assert!(matches!(err, VisualizerError::FileRead { .. }));
        assert!(err.to_string().contains("absent.csv"));
    }

    #[test]
    fn test_load_empty_file_names_path() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(dir.path(), "empty.csv", "date,value\n");
        let err = load_page_views(&path).unwrap_err();
        assert!(err.to_string().contains("empty.csv"));
    }
}
