//! Typed repetition rules.
//!
//! ## Grammar
//!
//! | Text | Rule |
//! |---|---|
//! | `d <N>` | every N days, 1 ≤ N ≤ 400 |
//! | `y` | every year on the anchor's month and day |
//! | `w <d1,d2,...>` | on the listed ISO weekdays (1 = Monday … 7 = Sunday) |
//! | `m <d1,...> [<m1,...>]` | on the listed days of month (negative counts from month end), optionally only in the listed months |

mod lexer;
mod parser;


use std::fmt;
use std::str::FromStr;

use chrono::Weekday;

use crate::calendar::last_day_of_month;
use crate::error::{RepeatError, RuleKind};

pub use parser::parse_rule;

/// Largest accepted interval for daily rules.
pub const MAX_INTERVAL_DAYS: u16 = 400;

/// A parsed, validated repetition rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    Daily { interval_days: u16 },
    Yearly,
    Weekly(WeekdaySet),
    Monthly(MonthlyRule),
}

impl Rule {
    #[must_use]
    pub const fn kind(&self) -> RuleKind {
        match self {
            Self::Daily { .. } => RuleKind::Daily,
            Self::Yearly => RuleKind::Yearly,
            Self::Weekly(_) => RuleKind::Weekly,
            Self::Monthly(_) => RuleKind::Monthly,
        }
    }
}

impl FromStr for Rule {
    type Err = RepeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_rule(s)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Daily { interval_days } => write!(f, "{} {interval_days}", self.kind()),
            Self::Yearly => write!(f, "{}", self.kind()),
            Self::Weekly(days) => write!(f, "{} {days}", self.kind()),
            Self::Monthly(monthly) => write!(f, "{} {monthly}", self.kind()),
        }
    }
}

/// Set of ISO weekday numbers (1 = Monday … 7 = Sunday).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    /// Adds an ISO weekday number. Returns false if it is outside 1..=7.
    pub fn insert(&mut self, iso_day: u8) -> bool {
        if !(1..=7).contains(&iso_day) {
            return false;
        }
        self.0 |= 1 << iso_day;
        true
    }

    #[must_use]
    pub fn contains(self, weekday: Weekday) -> bool {
        self.0 & (1 << weekday.number_from_monday()) != 0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the ISO weekday numbers in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=7).filter(move |day| self.0 & (1 << day) != 0)
    }
}

impl fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter())
    }
}

/// Set of month numbers (1 = January … 12 = December).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MonthSet(u16);

impl MonthSet {
    /// Adds a month number. Returns false if it is outside 1..=12.
    pub fn insert(&mut self, month: u8) -> bool {
        if !(1..=12).contains(&month) {
            return false;
        }
        self.0 |= 1 << month;
        true
    }

    #[must_use]
    pub fn contains(self, month: u32) -> bool {
        (1..=12).contains(&month) && self.0 & (1 << month) != 0
    }

    /// Iterates the month numbers in ascending order.
    pub fn iter(self) -> impl Iterator<Item = u8> {
        (1..=12).filter(move |month| self.0 & (1 << month) != 0)
    }
}

impl fmt::Debug for MonthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for MonthSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.iter())
    }
}

/// A configured day of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthDay {
    /// 1-based day counted from the start of the month.
    FromStart(u8),
    /// 1-based day counted back from the end of the month (1 = last day).
    FromEnd(u8),
}

impl MonthDay {
    /// Builds a day from its signed textual value. Returns `None` for 0 or
    /// magnitudes above 31.
    #[must_use]
    pub fn from_signed(value: i32) -> Option<Self> {
        let magnitude = u8::try_from(value.unsigned_abs()).ok()?;
        match value {
            1..=31 => Some(Self::FromStart(magnitude)),
            -31..=-1 => Some(Self::FromEnd(magnitude)),
            _ => None,
        }
    }

    const fn magnitude(self) -> u8 {
        match self {
            Self::FromStart(day) | Self::FromEnd(day) => day,
        }
    }

    /// Returns true if a month of `days` days contains this entry.
    #[must_use]
    pub fn fits_in(self, days: u32) -> bool {
        u32::from(self.magnitude()) <= days
    }

    /// Resolves the entry to a concrete day number in the given month, or
    /// `None` if the month is too short.
    #[must_use]
    pub fn resolve(self, year: i32, month: u32) -> Option<u32> {
        let last = last_day_of_month(year, month);
        if !self.fits_in(last) {
            return None;
        }
        Some(match self {
            Self::FromStart(day) => u32::from(day),
            Self::FromEnd(day) => last - u32::from(day) + 1,
        })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromStart(day) => write!(f, "{day}"),
            Self::FromEnd(day) => write!(f, "-{day}"),
        }
    }
}

/// Days of month plus an optional month restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRule {
    /// Configured days, in the order they were written.
    pub days: Vec<MonthDay>,
    /// Months the rule applies to; `None` means every month.
    pub months: Option<MonthSet>,
}

impl MonthlyRule {
    #[must_use]
    pub fn allows_month(&self, month: u32) -> bool {
        self.months.is_none_or(|months| months.contains(month))
    }
}

impl fmt::Display for MonthlyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, self.days.iter())?;
        if let Some(months) = self.months {
            write!(f, " {months}")?;
        }
        Ok(())
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
