use diesel::{prelude::*, sqlite::Sqlite};

use crate::db::schema;

/// A stored task. `date` is kept as `YYYYMMDD` text so it sorts chronologically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Queryable, Selectable, Identifiable)]
#[diesel(table_name = schema::scheduler)]
#[diesel(check_for_backend(Sqlite))]
pub struct Task {
    pub id: i64,
    pub date: String,
    pub title: String,
    pub comment: String,
    pub repeat: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = schema::scheduler)]
pub struct NewTask<'a> {
    pub date: &'a str,
    pub title: &'a str,
    pub comment: &'a str,
    pub repeat: &'a str,
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = schema::scheduler)]
pub struct TaskChangeset<'a> {
    pub date: &'a str,
    pub title: &'a str,
    pub comment: &'a str,
    pub repeat: &'a str,
}

impl<'a> From<&'a NewTask<'a>> for TaskChangeset<'a> {
    fn from(task: &'a NewTask<'a>) -> Self {
        Self {
            date: task.date,
            title: task.title,
            comment: task.comment,
            repeat: task.repeat,
        }
    }
}
