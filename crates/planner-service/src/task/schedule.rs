use chrono::NaiveDate;
use planner_repeat::{format_date, next_date, parse_date, parse_rule};

use crate::error::ServiceResult;

/// ## Summary
/// Resolves the date a task is stored under.
///
/// An empty date means today. A date before today moves to today when the
/// task has no repeat rule, or to the rule's next occurrence after today when
/// it has one. Dates from today onwards are kept. A non-empty rule is always
/// parsed, so malformed rules are rejected even for future dates.
///
/// ## Errors
/// Returns [`planner_repeat::RepeatError`] (wrapped) if the date is not
/// `YYYYMMDD` or the rule does not parse.
#[tracing::instrument(level = "debug", err(Display))]
pub fn schedule_date(today: NaiveDate, date: &str, repeat: &str) -> ServiceResult<String> {
    let repeat = repeat.trim();
    if !repeat.is_empty() {
        parse_rule(repeat)?;
    }

    if date.is_empty() {
        return Ok(format_date(today)?);
    }

    if parse_date(date)? >= today {
        return Ok(date.to_string());
    }

    if repeat.is_empty() {
        Ok(format_date(today)?)
    } else {
        Ok(next_date(today, date, repeat)?)
    }
}
