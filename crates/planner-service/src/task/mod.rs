//! Task scheduling and storage operations.
//!
//! ## Module Organization
//!
//! - `schedule`: date normalization applied when a task is saved
//! - `search`: interpretation of the listing's free-text search
//! - `service`: create, read, update, delete, complete and list

pub mod schedule;
pub mod search;
pub mod service;

pub use schedule::schedule_date;
pub use search::parse_search;
pub use service::{TaskDraft, complete_task, create_task, delete_task, get_task, list_tasks, parse_task_id, update_task};
