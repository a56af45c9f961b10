//! Single-task endpoints under `/api/task`.

use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::{Deserialize, Serialize};

use planner_core::constants::{TASK_DONE_ROUTE_COMPONENT, TASK_ROUTE_COMPONENT};
use planner_db::model::task::Task;
use planner_service::task::{self as task_service, TaskDraft, parse_task_id};

use crate::clock_handler::today_from_depot;
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult, render_error};

/// Task identifier as sent by clients: either a JSON string or a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TaskIdField {
    Text(String),
    Number(i64),
}

impl TaskIdField {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

/// ## Summary
/// Task payload for create and update
#[derive(Debug, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    pub id: Option<TaskIdField>,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

impl TaskRequest {
    fn into_parts(self) -> (Option<String>, TaskDraft) {
        (
            self.id.map(TaskIdField::into_text),
            TaskDraft {
                date: self.date,
                title: self.title,
                comment: self.comment,
                repeat: self.repeat,
            },
        )
    }
}

/// ## Summary
/// Task as returned to clients; ids travel as strings.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskResponse {
    pub id: String,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            date: task.date,
            title: task.title,
            comment: task.comment,
            repeat: task.repeat,
        }
    }
}

/// ## Summary
/// Response to a successful create
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

/// Empty JSON object returned by update, delete and done.
#[derive(Debug, Serialize)]
pub struct EmptyResponse {}

async fn parse_body(req: &mut Request) -> AppResult<TaskRequest> {
    req.parse_json()
        .await
        .map_err(|e| AppError::BadRequest(format!("malformed task body: {e}")))
}

async fn create(req: &mut Request, depot: &Depot) -> AppResult<i64> {
    let (_, draft) = parse_body(req).await?.into_parts();
    let today = today_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(task_service::create_task(&mut conn, today, &draft).await?)
}

async fn read(req: &mut Request, depot: &Depot) -> AppResult<Task> {
    let id = parse_task_id(req.query::<String>("id").as_deref())?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(task_service::get_task(&mut conn, id).await?)
}

async fn update(req: &mut Request, depot: &Depot) -> AppResult<()> {
    let (id, draft) = parse_body(req).await?.into_parts();
    let id = parse_task_id(id.as_deref())?;
    let today = today_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(task_service::update_task(&mut conn, today, id, &draft).await?)
}

async fn remove(req: &mut Request, depot: &Depot) -> AppResult<()> {
    let id = parse_task_id(req.query::<String>("id").as_deref())?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(task_service::delete_task(&mut conn, id).await?)
}

async fn complete(req: &mut Request, depot: &Depot) -> AppResult<()> {
    let id = parse_task_id(req.query::<String>("id").as_deref())?;
    let today = today_from_depot(depot)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    Ok(task_service::complete_task(&mut conn, today, id).await?)
}

fn render_empty(res: &mut Response, result: AppResult<()>) {
    match result {
        Ok(()) => res.render(Json(EmptyResponse {})),
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// POST /api/task - Creates a task, responding with `{"id": "..."}`.
///
/// ## Errors
/// Returns HTTP 400 for a malformed body, blank title, bad date or bad rule.
#[handler]
async fn create_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match create(req, depot).await {
        Ok(id) => res.render(Json(CreatedResponse { id: id.to_string() })),
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// GET /api/task?id= - Returns one task.
///
/// ## Errors
/// Returns HTTP 400 for a missing or malformed id and HTTP 404 if the task
/// does not exist.
#[handler]
async fn get_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match read(req, depot).await {
        Ok(task) => res.render(Json(TaskResponse::from(task))),
        Err(err) => render_error(res, &err),
    }
}

/// ## Summary
/// PUT /api/task - Replaces a task, responding with `{}`.
///
/// ## Errors
/// Returns HTTP 400 for invalid input and HTTP 404 if the task does not exist.
#[handler]
async fn update_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_empty(res, update(req, depot).await);
}

/// ## Summary
/// DELETE /api/task?id= - Deletes a task, responding with `{}`.
///
/// ## Errors
/// Returns HTTP 400 for a missing or malformed id and HTTP 404 if the task
/// does not exist.
#[handler]
async fn delete_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_empty(res, remove(req, depot).await);
}

/// ## Summary
/// POST /api/task/done?id= - Completes a task, responding with `{}`.
///
/// One-off tasks are deleted; repeating tasks move to their next date.
///
/// ## Errors
/// Returns HTTP 400 for a missing or malformed id and HTTP 404 if the task
/// does not exist.
#[handler]
async fn complete_task(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    render_empty(res, complete(req, depot).await);
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(TASK_ROUTE_COMPONENT)
        .post(create_task)
        .get(get_task)
        .put(update_task)
        .delete(delete_task)
        .push(Router::with_path(TASK_DONE_ROUTE_COMPONENT).post(complete_task))
}
