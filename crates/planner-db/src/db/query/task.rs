//! Query composition for `scheduler`.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema::scheduler;
use crate::model::task::{NewTask, Task, TaskChangeset};

/// Character used to escape LIKE wildcards in search text.
const LIKE_ESCAPE: char = '\\';

/// Which rows a listing returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFilter {
    All,
    /// Tasks scheduled on exactly this `YYYYMMDD` date.
    OnDate(String),
    /// Tasks whose title or comment contains this text.
    Text(String),
}

/// ## Summary
/// Returns a query over all tasks in schedule order.
#[must_use]
pub fn all() -> scheduler::BoxedQuery<'static, Sqlite> {
    scheduler::table
        .order((scheduler::date.asc(), scheduler::id.asc()))
        .into_boxed()
}

/// ## Summary
/// Returns a query selecting the tasks matched by `filter`.
#[must_use]
pub fn filtered(filter: &TaskFilter) -> scheduler::BoxedQuery<'static, Sqlite> {
    match filter {
        TaskFilter::All => all(),
        TaskFilter::OnDate(date) => all().filter(scheduler::date.eq(date.clone())),
        TaskFilter::Text(text) => {
            let pattern = format!("%{}%", escape_like(text));
            all().filter(
                scheduler::title
                    .like(pattern.clone())
                    .escape(LIKE_ESCAPE)
                    .or(scheduler::comment.like(pattern).escape(LIKE_ESCAPE)),
            )
        }
    }
}

/// Escapes LIKE wildcards so search text matches literally.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// ## Summary
/// Inserts a task and returns its new id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn insert(conn: &mut DbConnection<'_>, task: &NewTask<'_>) -> QueryResult<i64> {
    diesel::insert_into(scheduler::table)
        .values(task)
        .returning(scheduler::id)
        .get_result(conn)
        .await
}

/// ## Summary
/// Loads a task by id.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn find_by_id(conn: &mut DbConnection<'_>, id: i64) -> QueryResult<Option<Task>> {
    scheduler::table
        .find(id)
        .select(Task::as_select())
        .first(conn)
        .await
        .optional()
}

/// ## Summary
/// Overwrites every field of a task. Returns the number of rows changed.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: i64,
    changes: &TaskChangeset<'_>,
) -> QueryResult<usize> {
    diesel::update(scheduler::table.find(id))
        .set(changes)
        .execute(conn)
        .await
}

/// ## Summary
/// Moves a task to a new date. Returns the number of rows changed.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn update_date(conn: &mut DbConnection<'_>, id: i64, date: &str) -> QueryResult<usize> {
    diesel::update(scheduler::table.find(id))
        .set(scheduler::date.eq(date))
        .execute(conn)
        .await
}

/// ## Summary
/// Deletes a task. Returns the number of rows removed.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: i64) -> QueryResult<usize> {
    diesel::delete(scheduler::table.find(id))
        .execute(conn)
        .await
}

/// ## Summary
/// Lists up to `limit` tasks matched by `filter`, earliest date first.
///
/// ## Errors
/// Returns an error if the database operation fails.
pub async fn list(
    conn: &mut DbConnection<'_>,
    filter: &TaskFilter,
    limit: i64,
) -> QueryResult<Vec<Task>> {
    filtered(filter)
        .select(Task::as_select())
        .limit(limit)
        .load(conn)
        .await
}
