use chrono::NaiveDate;
use planner_db::db::query::task::TaskFilter;
use planner_repeat::DATE_FORMAT;

/// Date format accepted in search text, e.g. `15.03.2024`.
const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

/// ## Summary
/// Turns the optional search text of a listing into a row filter.
///
/// Text that reads as a `DD.MM.YYYY` date selects that exact date; any other
/// non-blank text matches title or comment by substring.
#[must_use]
pub fn parse_search(search: Option<&str>) -> TaskFilter {
    let Some(text) = search.map(str::trim).filter(|s| !s.is_empty()) else {
        return TaskFilter::All;
    };

    match NaiveDate::parse_from_str(text, SEARCH_DATE_FORMAT) {
        Ok(date) => TaskFilter::OnDate(date.format(DATE_FORMAT).to_string()),
        Err(_) => TaskFilter::Text(text.to_string()),
    }
}
