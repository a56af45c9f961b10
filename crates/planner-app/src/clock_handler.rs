use salvo::async_trait;
use std::sync::Arc;

use chrono::NaiveDate;
use planner_core::clock::Clock;
use planner_core::error::CoreError;

use crate::error::AppResult;

/// Injects the clock handlers use to decide what "today" is.
pub struct ClockHandler {
    pub clock: Arc<dyn Clock>,
}

#[async_trait]
impl salvo::Handler for ClockHandler {
    #[tracing::instrument(skip_all)]
    async fn handle(
        &self,
        _req: &mut salvo::Request,
        depot: &mut salvo::Depot,
        _res: &mut salvo::Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        depot.inject(Arc::clone(&self.clock));
    }
}

/// ## Summary
/// Returns today's date according to the clock in the depot.
///
/// ## Errors
/// Returns an error if no clock was injected.
pub fn today_from_depot(depot: &salvo::Depot) -> AppResult<NaiveDate> {
    depot
        .obtain::<Arc<dyn Clock>>()
        .map(|clock| clock.today())
        .map_err(|_err| CoreError::InvariantViolation("Clock not found in depot").into())
}
