use chrono::NaiveDate;

use crate::calendar;

/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use pageview_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    let negative = value < 0.0;
    let factor = 10_f64.powi(decimals as i32);
    let rounded = (value.abs() * factor).round() / factor;

    let grouped = group_thousands(&(rounded.trunc() as u64).to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", rounded.fract(), prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50".
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Tick label for a page view axis: whole numbers with separators.
///
/// ```
/// use pageview_core::formatting::format_axis_value;
///
/// assert_eq!(format_axis_value(25000.0), "25,000");
/// assert_eq!(format_axis_value(0.4), "0");
/// ```
pub fn format_axis_value(value: f64) -> String {
    format_number(value, 0)
}

/// Tick label for a date axis, e.g. `"2017-01"`.
pub fn format_axis_date(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Tick label for a date axis expressed in [`calendar::date_to_axis`] days.
///
/// Returns an empty label for coordinates outside the chrono range.
pub fn format_axis_days(days: i32) -> String {
    calendar::axis_to_date(days)
        .map(format_axis_date)
        .unwrap_or_default()
}

/// Label for an axis position that should only be annotated at integer
/// category indices; everything else gets an empty string.
pub fn format_category(position: f64, labels: &[String]) -> String {
    let idx = position.round();
    if (position - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = s.len() % 3;
    for (i, c) in s.chars().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
