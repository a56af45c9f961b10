//! Rule text parser.

use super::lexer::split_groups;
use super::{MAX_INTERVAL_DAYS, MonthDay, MonthSet, MonthlyRule, Rule, WeekdaySet};
use crate::calendar::max_month_length;
use crate::error::{RepeatError, RepeatResult, RuleKind};

/// Parses rule text into a [`Rule`].
///
/// ## Errors
/// Returns [`RepeatError::EmptyRule`] for blank text,
/// [`RepeatError::UnsupportedRule`] for text matching none of the grammars,
/// and a kind-specific error naming the offending token otherwise.
#[tracing::instrument(level = "trace")]
pub fn parse_rule(text: &str) -> RepeatResult<Rule> {
    let groups = split_groups(text);
    let unsupported = || RepeatError::UnsupportedRule(text.to_string());

    let Some((head, args)) = groups.split_first() else {
        return Err(RepeatError::EmptyRule);
    };
    let [prefix] = head.as_slice() else {
        return Err(unsupported());
    };
    let kind = RuleKind::from_prefix(prefix).ok_or_else(unsupported)?;

    let rule = match (kind, args) {
        (RuleKind::Yearly, []) => Rule::Yearly,
        (RuleKind::Daily, []) => {
            return Err(RepeatError::InvalidInterval {
                kind,
                token: String::new(),
            });
        }
        (RuleKind::Daily, [interval]) => parse_daily(interval)?,
        (RuleKind::Weekly | RuleKind::Monthly, []) => {
            return Err(RepeatError::EmptyDayList { kind });
        }
        (RuleKind::Weekly, [days]) => Rule::Weekly(parse_weekdays(days)?),
        (RuleKind::Monthly, [days]) => parse_monthly(text, days, None)?,
        (RuleKind::Monthly, [days, months]) => parse_monthly(text, days, Some(months.as_slice()))?,
        _ => return Err(unsupported()),
    };

    tracing::trace!(%rule, "Parsed repeat rule");
    Ok(rule)
}

fn parse_daily(group: &[&str]) -> RepeatResult<Rule> {
    let invalid = || RepeatError::InvalidInterval {
        kind: RuleKind::Daily,
        token: group.join(","),
    };

    let [token] = group else {
        return Err(invalid());
    };
    let interval_days = token.parse::<u16>().map_err(|_err| invalid())?;
    if !(1..=MAX_INTERVAL_DAYS).contains(&interval_days) {
        return Err(invalid());
    }

    Ok(Rule::Daily { interval_days })
}

fn parse_weekdays(group: &[&str]) -> RepeatResult<WeekdaySet> {
    let mut days = WeekdaySet::default();
    for token in group {
        let inserted = token
            .parse::<u8>()
            .is_ok_and(|day| days.insert(day));
        if !inserted {
            return Err(RepeatError::InvalidWeekday {
                kind: RuleKind::Weekly,
                token: (*token).to_string(),
            });
        }
    }
    Ok(days)
}

fn parse_monthly(text: &str, day_group: &[&str], month_group: Option<&[&str]>) -> RepeatResult<Rule> {
    let days = day_group
        .iter()
        .map(|token| {
            token
                .parse::<i32>()
                .ok()
                .and_then(MonthDay::from_signed)
                .ok_or_else(|| RepeatError::InvalidMonthDay {
                    kind: RuleKind::Monthly,
                    token: (*token).to_string(),
                })
        })
        .collect::<RepeatResult<Vec<_>>>()?;

    let months = month_group.map(parse_months).transpose()?;

    let monthly = MonthlyRule { days, months };
    if !is_satisfiable(&monthly) {
        return Err(RepeatError::UnsatisfiableRule {
            rule: text.trim().to_string(),
        });
    }

    Ok(Rule::Monthly(monthly))
}

fn parse_months(group: &[&str]) -> RepeatResult<MonthSet> {
    let mut months = MonthSet::default();
    for token in group {
        let inserted = token
            .parse::<u8>()
            .is_ok_and(|month| months.insert(month));
        if !inserted {
            return Err(RepeatError::InvalidMonth {
                kind: RuleKind::Monthly,
                token: (*token).to_string(),
            });
        }
    }
    Ok(months)
}

/// True if at least one configured day fits in at least one allowed month.
fn is_satisfiable(monthly: &MonthlyRule) -> bool {
    (1..=12u32)
        .filter(|month| monthly.allows_month(*month))
        .any(|month| {
            let longest = max_month_length(month);
            monthly.days.iter().any(|day| day.fits_in(longest))
        })
}
