/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const NEXT_DATE_ROUTE_COMPONENT: &str = "nextdate";
pub const NEXT_DATE_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", NEXT_DATE_ROUTE_COMPONENT);

pub const SIGN_IN_ROUTE_COMPONENT: &str = "signin";
pub const SIGN_IN_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", SIGN_IN_ROUTE_COMPONENT);

pub const TASK_ROUTE_COMPONENT: &str = "task";
pub const TASK_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", TASK_ROUTE_COMPONENT);

pub const TASK_DONE_ROUTE_COMPONENT: &str = "done";
pub const TASK_DONE_ROUTE_PREFIX: &str =
    const_str::concat!(TASK_ROUTE_PREFIX, "/", TASK_DONE_ROUTE_COMPONENT);

pub const TASKS_ROUTE_COMPONENT: &str = "tasks";
pub const TASKS_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", TASKS_ROUTE_COMPONENT);

/// Cookie carrying the signed session token.
pub const TOKEN_COOKIE_NAME: &str = "token";

/// Upper bound on rows returned by a task listing.
pub const TASK_LIST_LIMIT: i64 = 50;

/// Longest repeat rule a task may store, in characters.
pub const REPEAT_MAX_CHARS: usize = 128;
