use chrono::{Datelike, Month, NaiveDate};

// ── Month labels ──────────────────────────────────────────────────────────────

/// All twelve months in calendar order.
pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Full English month name for a 1-based month number (`1` → `"January"`).
///
/// Returns `None` outside `1..=12`.
pub fn month_name(month: u32) -> Option<&'static str> {
    month_from_number(month).map(|m| m.name())
}

/// Three-letter abbreviation for a 1-based month number (`1` → `"Jan"`).
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    month_name(month).map(|name| &name[..3])
}

/// Abbreviations in calendar order: `["Jan", "Feb", …, "Dec"]`.
pub fn month_abbrevs() -> [&'static str; 12] {
    MONTHS.map(|m| &m.name()[..3])
}

fn month_from_number(month: u32) -> Option<Month> {
    let idx = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTHS.get(idx).copied()
}

// ── Date helpers ──────────────────────────────────────────────────────────────

/// `(year, month)` key used for monthly grouping.
pub fn year_month(date: NaiveDate) -> (i32, u32) {
    (date.year(), date.month())
}

/// Days since 0001-01-01 (CE), used as a linear axis coordinate.
pub fn date_to_axis(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

/// Inverse of [`date_to_axis`].
pub fn axis_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
