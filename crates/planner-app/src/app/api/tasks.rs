use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::{Deserialize, Serialize};

use planner_core::constants::TASKS_ROUTE_COMPONENT;
use planner_service::task::{list_tasks, parse_search};

use super::task::TaskResponse;
use crate::db_handler::get_db_from_depot;
use crate::error::{AppResult, render_error};

/// ## Summary
/// Task listing; `tasks` is always an array, possibly empty.
#[derive(Debug, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
}

async fn list(req: &mut Request, depot: &Depot) -> AppResult<TaskListResponse> {
    let filter = parse_search(req.query::<String>("search").as_deref());
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let tasks = list_tasks(&mut conn, &filter).await?;
    Ok(TaskListResponse {
        tasks: tasks.into_iter().map(TaskResponse::from).collect(),
    })
}

/// ## Summary
/// GET /api/tasks?search= - Lists upcoming tasks, earliest first.
///
/// `search` in `DD.MM.YYYY` form selects that date; other text matches title
/// or comment.
///
/// ## Errors
/// Returns HTTP 500 if storage fails.
#[handler]
async fn list_tasks_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match list(req, depot).await {
        Ok(body) => res.render(Json(body)),
        Err(err) => render_error(res, &err),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(TASKS_ROUTE_COMPONENT).get(list_tasks_handler)
}
