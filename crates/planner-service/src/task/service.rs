//! Task operations over a database connection.

use chrono::NaiveDate;
use diesel_async::AsyncConnection;
use diesel_async::scoped_futures::ScopedFutureExt;

use planner_core::constants::{REPEAT_MAX_CHARS, TASK_LIST_LIMIT};
use planner_db::db::connection::DbConnection;
use planner_db::db::query::task::{self, TaskFilter};
use planner_db::model::task::{NewTask, Task, TaskChangeset};
use planner_repeat::next_date;

use crate::error::{ServiceError, ServiceResult};
use crate::task::schedule::schedule_date;

/// Client-supplied task fields, before scheduling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

impl TaskDraft {
    /// Validates the draft and resolves its stored date.
    fn scheduled(&self, today: NaiveDate) -> ServiceResult<String> {
        if self.title.trim().is_empty() {
            return Err(ServiceError::ValidationError("task title is required".to_string()));
        }
        if self.repeat.trim().chars().count() > REPEAT_MAX_CHARS {
            return Err(ServiceError::ValidationError(format!(
                "repeat rule is longer than {REPEAT_MAX_CHARS} characters"
            )));
        }
        schedule_date(today, &self.date, &self.repeat)
    }
}

/// ## Summary
/// Parses a task identifier received as text.
///
/// ## Errors
/// Returns `ValidationError` if the id is missing or not a positive integer.
pub fn parse_task_id(id: Option<&str>) -> ServiceResult<i64> {
    let id = id
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ServiceError::ValidationError("task id is required".to_string()))?;

    id.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ServiceError::ValidationError(format!("invalid task id '{id}'")))
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::NotFound(format!("task {id}"))
}

/// ## Summary
/// Stores a new task and returns its id.
///
/// ## Errors
/// Returns `ValidationError` for a blank title, a wrapped `RepeatError` for a
/// bad date or rule, and database errors.
#[tracing::instrument(skip(conn, draft), fields(title = %draft.title))]
pub async fn create_task(
    conn: &mut DbConnection<'_>,
    today: NaiveDate,
    draft: &TaskDraft,
) -> ServiceResult<i64> {
    let date = draft.scheduled(today)?;
    let new_task = NewTask {
        date: &date,
        title: draft.title.trim(),
        comment: &draft.comment,
        repeat: draft.repeat.trim(),
    };

    let id = task::insert(conn, &new_task).await?;
    tracing::info!(id, %date, "Task created");
    Ok(id)
}

/// ## Summary
/// Loads a task by id.
///
/// ## Errors
/// Returns `NotFound` if no such task exists, and database errors.
#[tracing::instrument(skip(conn))]
pub async fn get_task(conn: &mut DbConnection<'_>, id: i64) -> ServiceResult<Task> {
    task::find_by_id(conn, id).await?.ok_or_else(|| not_found(id))
}

/// ## Summary
/// Replaces every field of an existing task.
///
/// ## Errors
/// Returns `NotFound` if no such task exists, plus the errors of [`create_task`].
#[tracing::instrument(skip(conn, draft), fields(title = %draft.title))]
pub async fn update_task(
    conn: &mut DbConnection<'_>,
    today: NaiveDate,
    id: i64,
    draft: &TaskDraft,
) -> ServiceResult<()> {
    let date = draft.scheduled(today)?;
    let changes = TaskChangeset {
        date: &date,
        title: draft.title.trim(),
        comment: &draft.comment,
        repeat: draft.repeat.trim(),
    };

    if task::update(conn, id, &changes).await? == 0 {
        return Err(not_found(id));
    }
    tracing::info!(%date, "Task updated");
    Ok(())
}

/// ## Summary
/// Deletes a task.
///
/// ## Errors
/// Returns `NotFound` if no such task exists, and database errors.
#[tracing::instrument(skip(conn))]
pub async fn delete_task(conn: &mut DbConnection<'_>, id: i64) -> ServiceResult<()> {
    if task::delete(conn, id).await? == 0 {
        return Err(not_found(id));
    }
    tracing::info!("Task deleted");
    Ok(())
}

/// ## Summary
/// Marks a task done: one-off tasks are deleted, repeating tasks move to
/// their next occurrence after today.
///
/// ## Side Effects
/// - Deletes the row, or updates its date, inside one transaction
///
/// ## Errors
/// Returns `NotFound` if no such task exists, a wrapped `RepeatError` if the
/// stored date or rule no longer evaluates, and database errors.
#[tracing::instrument(skip(conn))]
pub async fn complete_task(
    conn: &mut DbConnection<'_>,
    today: NaiveDate,
    id: i64,
) -> ServiceResult<()> {
    conn.transaction::<_, ServiceError, _>(move |tx| {
        async move {
            let stored = task::find_by_id(tx, id).await?.ok_or_else(|| not_found(id))?;

            if stored.repeat.trim().is_empty() {
                task::delete(tx, id).await?;
                tracing::info!("One-off task completed and removed");
                return Ok(());
            }

            let next = next_date(today, &stored.date, &stored.repeat)?;
            task::update_date(tx, id, &next).await?;
            tracing::info!(from = %stored.date, to = %next, "Repeating task rescheduled");
            Ok(())
        }
        .scope_boxed()
    })
    .await
}

/// ## Summary
/// Lists up to the listing limit of tasks matched by `filter`, earliest first.
///
/// ## Errors
/// Returns database errors.
#[tracing::instrument(skip(conn))]
pub async fn list_tasks(conn: &mut DbConnection<'_>, filter: &TaskFilter) -> ServiceResult<Vec<Task>> {
    let tasks = task::list(conn, filter, TASK_LIST_LIMIT).await?;
    tracing::debug!(count = tasks.len(), "Tasks listed");
    Ok(tasks)
}
