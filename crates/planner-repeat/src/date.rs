//! Text codec for task dates (`YYYYMMDD`).

use chrono::{Datelike, NaiveDate};

use crate::error::{RepeatError, RepeatResult};

/// chrono format string for task dates.
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Largest year that still fits in eight digits.
pub const MAX_YEAR: i32 = 9999;

/// Parses an eight-digit `YYYYMMDD` date.
///
/// ## Errors
/// Returns [`RepeatError::Format`] if the text is not exactly eight ASCII digits
/// or does not name a real calendar date.
pub fn parse_date(text: &str) -> RepeatResult<NaiveDate> {
    let format_error = || RepeatError::Format {
        input: text.to_string(),
    };

    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format_error());
    }

    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_err| format_error())
}

/// Renders a date as `YYYYMMDD`.
///
/// ## Errors
/// Returns [`RepeatError::DateOutOfRange`] for dates whose year needs more
/// than four digits.
pub fn format_date(date: NaiveDate) -> RepeatResult<String> {
    if !(0..=MAX_YEAR).contains(&date.year()) {
        return Err(RepeatError::DateOutOfRange);
    }
    Ok(date.format(DATE_FORMAT).to_string())
}
