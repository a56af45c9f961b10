mod healthcheck;
mod nextdate;
mod signin;
mod task;
mod tasks;

use std::sync::Arc;

use salvo::Router;

use planner_service::auth::TokenAuthority;

use crate::middleware::auth::AuthMiddleware;

// Re-export route constants from core
pub use planner_core::constants::{API_ROUTE_COMPONENT, API_ROUTE_PREFIX};

/// ## Summary
/// Constructs the API router. Task routes sit behind [`AuthMiddleware`];
/// health, next-date and sign-in routes are public.
#[must_use]
pub fn routes(authority: Option<Arc<TokenAuthority>>) -> Router {
    Router::with_path(API_ROUTE_COMPONENT)
        .push(healthcheck::routes())
        .push(nextdate::routes())
        .push(signin::routes(authority.clone()))
        .push(
            Router::new()
                .hoop(AuthMiddleware::new(authority))
                .push(task::routes())
                .push(tasks::routes()),
        )
}
