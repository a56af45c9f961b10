//! Calendar arithmetic shared by the rule parser and the date advancer.

use chrono::{Datelike, NaiveDate};

/// A leap year, used when asking how long a month can ever be.
const LEAP_REFERENCE_YEAR: i32 = 2000;

/// Returns true if `year` is a Gregorian leap year.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the number of the last day of `month` (1-based) in `year`.
///
/// Computed as the day before the first of the following month, so December
/// rolls over into January of `year + 1`. Years outside chrono's range fall
/// back to the fixed month-length table.
#[must_use]
pub fn last_day_of_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 12 {
        (year.saturating_add(1), 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first| first.pred_opt())
        .map_or_else(|| month_length(year, month), |last| last.day())
}

/// Returns the longest length `month` can have in any year (29 for February).
#[must_use]
pub fn max_month_length(month: u32) -> u32 {
    month_length(LEAP_REFERENCE_YEAR, month)
}

fn month_length(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Returns the `(year, month)` following the given one.
#[must_use]
pub const fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year.saturating_add(1), 1)
    } else {
        (year, month + 1)
    }
}
