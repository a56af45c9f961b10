//! Recurrence engine for repeating tasks.
//!
//! Given a task's anchor date, a reference date and rule text, computes the
//! next occurrence. Pure and synchronous: no I/O, no clock reads, no shared
//! state.
//!
//! ```
//! use chrono::NaiveDate;
//! use planner_repeat::next_date;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
//! assert_eq!(next_date(today, "20240229", "y").unwrap(), "20250301");
//! ```

pub mod advance;
pub mod calendar;
pub mod date;
pub mod error;
pub mod rule;

use chrono::NaiveDate;

pub use advance::advance;
pub use date::{DATE_FORMAT, format_date, parse_date};
pub use error::{RepeatError, RepeatResult, RuleKind};
pub use rule::{MonthDay, MonthSet, MonthlyRule, Rule, WeekdaySet, parse_rule};

/// Computes the next occurrence of `rule_text` for a task dated `anchor_text`,
/// strictly after `reference`.
///
/// Blank rule text is reported first, then a malformed anchor date, then
/// any other rule error.
///
/// ## Errors
/// Returns [`RepeatError::EmptyRule`] for blank rule text,
/// [`RepeatError::Format`] for a malformed anchor date, any of the rule
/// parsing errors for malformed rule text, and the advancement errors of
/// [`advance`].
#[tracing::instrument(level = "debug", err(Display))]
pub fn next_date(reference: NaiveDate, anchor_text: &str, rule_text: &str) -> RepeatResult<String> {
    if rule_text.trim().is_empty() {
        return Err(RepeatError::EmptyRule);
    }
    let anchor = parse_date(anchor_text)?;
    let rule = parse_rule(rule_text)?;
    let next = advance(&rule, anchor, reference)?;
    format_date(next)
}
