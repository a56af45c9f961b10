//! Date advancement for parsed rules.
//!
//! Every variant returns the first qualifying date strictly after
//! `max(anchor, reference)`: the anchor's own slot is always consumed, and a
//! rule satisfied on the reference date moves on to the next occurrence.

use chrono::{Datelike, Days, NaiveDate};

use crate::calendar::next_month;
use crate::error::{RepeatError, RepeatResult};
use crate::rule::{MonthlyRule, Rule, WeekdaySet};

/// Months scanned before a monthly rule gives up. Covers a Feb-29-only rule
/// across a skipped century leap year (eight years between occurrences).
const MAX_MONTH_SCAN: u32 = 12 * 9;

/// Computes the next occurrence of `rule` after both `anchor` and `reference`.
///
/// ## Errors
/// Returns [`RepeatError::DateOutOfRange`] if the result would leave chrono's
/// calendar range and [`RepeatError::NoOccurrence`] if a monthly rule finds no
/// date within the scan window.
pub fn advance(rule: &Rule, anchor: NaiveDate, reference: NaiveDate) -> RepeatResult<NaiveDate> {
    let threshold = anchor.max(reference);

    let next = match rule {
        Rule::Daily { interval_days } => advance_daily(anchor, threshold, *interval_days)?,
        Rule::Yearly => advance_yearly(anchor, threshold)?,
        Rule::Weekly(days) => advance_weekly(rule, *days, threshold)?,
        Rule::Monthly(monthly) => advance_monthly(rule, monthly, threshold)?,
    };

    tracing::trace!(%rule, %anchor, %reference, %next, "Advanced date");
    Ok(next)
}

/// Smallest `anchor + k * interval` (k ≥ 1) after `threshold`.
fn advance_daily(anchor: NaiveDate, threshold: NaiveDate, interval_days: u16) -> RepeatResult<NaiveDate> {
    let interval = u64::from(interval_days.max(1));
    let elapsed = u64::try_from((threshold - anchor).num_days())
        .map_err(|_err| RepeatError::DateOutOfRange)?;
    let steps = elapsed / interval + 1;

    anchor
        .checked_add_days(Days::new(steps * interval))
        .ok_or(RepeatError::DateOutOfRange)
}

/// The anchor's month and day in `year`. A Feb 29 anchor lands on Mar 1 in
/// every later year: the first step always hits a common year, and the
/// series then continues from Mar 1.
fn yearly_occurrence(anchor: NaiveDate, year: i32) -> Option<NaiveDate> {
    if anchor.month() == 2 && anchor.day() == 29 {
        return NaiveDate::from_ymd_opt(year, 3, 1);
    }
    NaiveDate::from_ymd_opt(year, anchor.month(), anchor.day())
}

fn advance_yearly(anchor: NaiveDate, threshold: NaiveDate) -> RepeatResult<NaiveDate> {
    let first_year = anchor.year().checked_add(1).ok_or(RepeatError::DateOutOfRange)?;
    let mut year = first_year.max(threshold.year());

    loop {
        let candidate = yearly_occurrence(anchor, year).ok_or(RepeatError::DateOutOfRange)?;
        if candidate > threshold {
            return Ok(candidate);
        }
        year = year.checked_add(1).ok_or(RepeatError::DateOutOfRange)?;
    }
}

fn advance_weekly(rule: &Rule, days: WeekdaySet, threshold: NaiveDate) -> RepeatResult<NaiveDate> {
    let mut candidate = threshold;
    for _ in 0..7 {
        candidate = candidate.succ_opt().ok_or(RepeatError::DateOutOfRange)?;
        if days.contains(candidate.weekday()) {
            return Ok(candidate);
        }
    }

    Err(RepeatError::NoOccurrence {
        rule: rule.to_string(),
    })
}

fn advance_monthly(rule: &Rule, monthly: &MonthlyRule, threshold: NaiveDate) -> RepeatResult<NaiveDate> {
    let (mut year, mut month) = (threshold.year(), threshold.month());

    for _ in 0..MAX_MONTH_SCAN {
        if year > NaiveDate::MAX.year() {
            return Err(RepeatError::DateOutOfRange);
        }

        if monthly.allows_month(month) {
            let earliest = monthly
                .days
                .iter()
                .filter_map(|day| day.resolve(year, month))
                .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
                .filter(|date| *date > threshold)
                .min();

            if let Some(date) = earliest {
                return Ok(date);
            }
        }

        (year, month) = next_month(year, month);
    }

    tracing::warn!(%rule, %threshold, "Monthly rule found no date within the scan window");
    Err(RepeatError::NoOccurrence {
        rule: rule.to_string(),
    })
}
