pub mod api;
pub mod web;

use std::sync::Arc;

use salvo::Router;

use planner_core::clock::Clock;
use planner_core::config::Settings;
use planner_db::db::DbProvider;
use planner_service::auth::TokenAuthority;

use crate::clock_handler::ClockHandler;
use crate::config::ConfigHandler;
use crate::db_handler::DbProviderHandler;

/// ## Summary
/// Assembles the full application router: depot hoops, the JSON API and the
/// static frontend.
///
/// ## Errors
/// Returns an error if the auth settings are invalid.
pub fn router<P>(settings: &Settings, provider: P, clock: Arc<dyn Clock>) -> anyhow::Result<Router>
where
    P: DbProvider + Send + Sync + Clone + 'static,
{
    let authority = TokenAuthority::from_config(&settings.auth)?.map(Arc::new);

    Ok(Router::new()
        .hoop(DbProviderHandler { provider })
        .hoop(ConfigHandler {
            settings: Arc::new(settings.clone()),
        })
        .hoop(ClockHandler { clock })
        .push(api::routes(authority))
        .push(web::routes(&settings.web.dir)))
}
