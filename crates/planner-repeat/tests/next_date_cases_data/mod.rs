use chrono::NaiveDate;

pub struct NextDateCase {
    pub name: &'static str,
    pub now: &'static str,
    pub date: &'static str,
    pub repeat: &'static str,
    /// `None` when the inputs must be rejected.
    pub expected: Option<&'static str>,
}

#[expect(clippy::too_many_lines)]
pub fn next_date_cases() -> Vec<NextDateCase> {
    vec![
        NextDateCase {
            name: "yearly_basic",
            now: "20250701",
            date: "20250701",
            repeat: "y",
            expected: Some("20260701"),
        },
        NextDateCase {
            name: "yearly_leap_day_folds_to_march",
            now: "20240229",
            date: "20240229",
            repeat: "y",
            expected: Some("20250301"),
        },
        NextDateCase {
            name: "yearly_march_first",
            now: "20240301",
            date: "20240301",
            repeat: "y",
            expected: Some("20250301"),
        },
        NextDateCase {
            name: "yearly_new_years_eve",
            now: "20201231",
            date: "20201231",
            repeat: "y",
            expected: Some("20211231"),
        },
        NextDateCase {
            name: "yearly_catches_up_to_now",
            now: "20240101",
            date: "20201231",
            repeat: "y",
            expected: Some("20241231"),
        },
        NextDateCase {
            name: "yearly_leap_day_anchor_with_later_now",
            now: "20240301",
            date: "20240229",
            repeat: "y",
            expected: Some("20250301"),
        },
        NextDateCase {
            name: "daily_thirty_across_leap_february",
            now: "20240202",
            date: "20240202",
            repeat: "d 30",
            expected: Some("20240303"),
        },
        NextDateCase {
            name: "daily_into_leap_day",
            now: "20240228",
            date: "20240228",
            repeat: "d 1",
            expected: Some("20240229"),
        },
        NextDateCase {
            name: "daily_basic",
            now: "20240227",
            date: "20240227",
            repeat: "d 1",
            expected: Some("20240228"),
        },
        NextDateCase {
            name: "daily_full_year_in_leap_year",
            now: "20240228",
            date: "20240228",
            repeat: "d 365",
            expected: Some("20250227"),
        },
        NextDateCase {
            name: "daily_catches_up_past_month_end",
            now: "20240301",
            date: "20240228",
            repeat: "d 1",
            expected: Some("20240302"),
        },
        NextDateCase {
            name: "daily_interval_limit",
            now: "20240101",
            date: "20240101",
            repeat: "d 400",
            expected: Some("20250204"),
        },
        NextDateCase {
            name: "weekly_from_sunday",
            now: "20230101",
            date: "20230101",
            repeat: "w 1,3,5",
            expected: Some("20230102"),
        },
        NextDateCase {
            name: "weekly_now_on_listed_day",
            now: "20230102",
            date: "20230101",
            repeat: "w 1,3,5",
            expected: Some("20230104"),
        },
        NextDateCase {
            name: "weekly_thursday_to_friday",
            now: "20230105",
            date: "20230101",
            repeat: "w 1,3,5",
            expected: Some("20230106"),
        },
        NextDateCase {
            name: "weekly_wraps_to_next_week",
            now: "20230107",
            date: "20230107",
            repeat: "w 2,4,6",
            expected: Some("20230110"),
        },
        NextDateCase {
            name: "monthly_day_28",
            now: "20240228",
            date: "20240228",
            repeat: "m 28",
            expected: Some("20240328"),
        },
        NextDateCase {
            name: "monthly_day_31",
            now: "20240228",
            date: "20240228",
            repeat: "m 31",
            expected: Some("20240331"),
        },
        NextDateCase {
            name: "monthly_last_day_of_leap_february",
            now: "20240228",
            date: "20240228",
            repeat: "m -1",
            expected: Some("20240229"),
        },
        NextDateCase {
            name: "monthly_counted_from_end",
            now: "20240222",
            date: "20240222",
            repeat: "m -2,-3",
            expected: Some("20240227"),
        },
        NextDateCase {
            name: "monthly_mixed_signs",
            now: "20240201",
            date: "20240201",
            repeat: "m -1,18",
            expected: Some("20240218"),
        },
        NextDateCase {
            name: "monthly_restricted_months",
            now: "20240315",
            date: "20240315",
            repeat: "m 1,-1 1,6",
            expected: Some("20240601"),
        },
        NextDateCase {
            name: "unknown_prefix",
            now: "20240101",
            date: "20240101",
            repeat: "x 5",
            expected: None,
        },
        NextDateCase {
            name: "daily_interval_too_large",
            now: "20240101",
            date: "20240101",
            repeat: "d 401",
            expected: None,
        },
        NextDateCase {
            name: "daily_missing_interval",
            now: "20240101",
            date: "20240101",
            repeat: "d",
            expected: None,
        },
        NextDateCase {
            name: "weekly_day_out_of_range",
            now: "20240101",
            date: "20240101",
            repeat: "w 8",
            expected: None,
        },
        NextDateCase {
            name: "monthly_day_zero",
            now: "20240101",
            date: "20240101",
            repeat: "m 0",
            expected: None,
        },
        NextDateCase {
            name: "monthly_third_from_end",
            now: "20240101",
            date: "20240101",
            repeat: "m -3",
            expected: Some("20240129"),
        },
        NextDateCase {
            name: "monthly_month_out_of_range",
            now: "20240101",
            date: "20240101",
            repeat: "m 1 13",
            expected: None,
        },
        NextDateCase {
            name: "yearly_with_arguments",
            now: "20240101",
            date: "20240101",
            repeat: "y 1",
            expected: None,
        },
        NextDateCase {
            name: "malformed_anchor",
            now: "20240101",
            date: "2024011",
            repeat: "d 1",
            expected: None,
        },
    ]
}

pub fn parse_case_date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y%m%d").expect("case dates are valid")
}

pub fn assert_case(case: &NextDateCase) {
    let now = parse_case_date(case.now);
    let result = planner_repeat::next_date(now, case.date, case.repeat);

    match (case.expected, result) {
        (Some(expected), Ok(actual)) => {
            assert_eq!(actual, expected, "case {}", case.name);
        }
        (Some(expected), Err(err)) => {
            panic!("case {}: expected {expected}, got error {err}", case.name);
        }
        (None, Ok(actual)) => {
            panic!("case {}: expected rejection, got {actual}", case.name);
        }
        (None, Err(_)) => {}
    }
}
