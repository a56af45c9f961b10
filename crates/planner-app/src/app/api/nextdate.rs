use salvo::writing::Text;
use salvo::{Depot, Request, Response, Router, handler};

use planner_core::constants::NEXT_DATE_ROUTE_COMPONENT;
use planner_repeat::{next_date, parse_date};

use crate::clock_handler::today_from_depot;
use crate::error::AppResult;

fn compute(req: &Request, depot: &Depot) -> AppResult<String> {
    let now = match req.query::<String>("now").filter(|s| !s.is_empty()) {
        Some(text) => parse_date(&text)?,
        None => today_from_depot(depot)?,
    };
    let date = req.query::<String>("date").unwrap_or_default();
    let repeat = req.query::<String>("repeat").unwrap_or_default();

    Ok(next_date(now, &date, &repeat)?)
}

/// ## Summary
/// GET /api/nextdate?now=&date=&repeat= - Computes a rule's next occurrence.
///
/// Responds with the date as plain `YYYYMMDD` text. `now` defaults to today.
///
/// ## Errors
/// Returns HTTP 400 with the error text if any input is invalid.
#[handler]
async fn next_date_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match compute(req, depot) {
        Ok(next) => res.render(Text::Plain(next)),
        Err(err) => {
            tracing::debug!(error = %err, "Next date rejected");
            res.status_code(err.status_code());
            res.render(Text::Plain(err.public_message()));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(NEXT_DATE_ROUTE_COMPONENT).get(next_date_handler)
}
