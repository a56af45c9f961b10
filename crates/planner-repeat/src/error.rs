use std::fmt;

use thiserror::Error;

/// Which of the four rule grammars an error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    Daily,
    Yearly,
    Weekly,
    Monthly,
}

impl RuleKind {
    /// Returns the rule prefix as written in rule text.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Daily => "d",
            Self::Yearly => "y",
            Self::Weekly => "w",
            Self::Monthly => "m",
        }
    }

    /// Maps a rule prefix back to its kind.
    #[must_use]
    pub fn from_prefix(s: &str) -> Option<Self> {
        Some(match s {
            "d" => Self::Daily,
            "y" => Self::Yearly,
            "w" => Self::Weekly,
            "m" => Self::Monthly,
            _ => return None,
        })
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Errors raised while parsing rule text or advancing a date.
///
/// Every variant is terminal for the call. `EmptyRule` is the one callers may
/// legitimately treat as "no repetition".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepeatError {
    #[error("invalid date '{input}': expected YYYYMMDD")]
    Format { input: String },

    #[error("repeat rule is empty")]
    EmptyRule,

    #[error("unsupported repeat rule '{0}'")]
    UnsupportedRule(String),

    #[error("invalid interval '{token}' in '{kind}' rule: expected an integer from 1 to 400")]
    InvalidInterval { kind: RuleKind, token: String },

    #[error("invalid weekday '{token}' in '{kind}' rule: expected an integer from 1 to 7")]
    InvalidWeekday { kind: RuleKind, token: String },

    #[error(
        "invalid day of month '{token}' in '{kind}' rule: expected a non-zero integer from -31 to 31"
    )]
    InvalidMonthDay { kind: RuleKind, token: String },

    #[error("invalid month '{token}' in '{kind}' rule: expected an integer from 1 to 12")]
    InvalidMonth { kind: RuleKind, token: String },

    #[error("'{kind}' rule has no days listed")]
    EmptyDayList { kind: RuleKind },

    #[error("repeat rule '{rule}' can never produce a date")]
    UnsatisfiableRule { rule: String },

    #[error("repeat rule '{rule}' produced no date within the search window")]
    NoOccurrence { rule: String },

    #[error("next date is outside the supported calendar range")]
    DateOutOfRange,
}

impl RepeatError {
    /// Returns the rule kind the error was raised for, if any.
    #[must_use]
    pub const fn kind(&self) -> Option<RuleKind> {
        match self {
            Self::InvalidInterval { kind, .. }
            | Self::InvalidWeekday { kind, .. }
            | Self::InvalidMonthDay { kind, .. }
            | Self::InvalidMonth { kind, .. }
            | Self::EmptyDayList { kind } => Some(*kind),
            Self::Format { .. }
            | Self::EmptyRule
            | Self::UnsupportedRule(_)
            | Self::UnsatisfiableRule { .. }
            | Self::NoOccurrence { .. }
            | Self::DateOutOfRange => None,
        }
    }
}

pub type RepeatResult<T> = std::result::Result<T, RepeatError>;
