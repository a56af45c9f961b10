use std::sync::Arc;

use chrono::Utc;
use salvo::http::cookie::{Cookie, SameSite};
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router};
use serde::{Deserialize, Serialize};

use planner_core::constants::{SIGN_IN_ROUTE_COMPONENT, TOKEN_COOKIE_NAME};
use planner_service::auth::TokenAuthority;
use planner_service::error::ServiceError;

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult, render_error};

/// ## Summary
/// Sign-in request payload
#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub password: String,
}

/// ## Summary
/// Sign-in response payload
#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub token: String,
}

/// POST /api/signin - Exchanges the configured password for a session token.
///
/// Holds the authority built from configuration at startup; `None` means no
/// password is configured and sign-in always fails.
pub struct SignInHandler {
    authority: Option<Arc<TokenAuthority>>,
}

impl SignInHandler {
    async fn sign_in(&self, req: &mut Request) -> AppResult<String> {
        let body: SignInRequest = req
            .parse_json()
            .await
            .map_err(|e| AppError::BadRequest(format!("malformed sign-in body: {e}")))?;

        let Some(authority) = &self.authority else {
            tracing::info!("Sign-in attempted but no password is configured");
            return Err(ServiceError::NotAuthenticated.into());
        };

        Ok(authority.sign_in(&body.password, Utc::now())?)
    }
}

/// ## Summary
/// Responds with `{"token": ...}` and also sets the token cookie.
///
/// ## Errors
/// Returns HTTP 400 for a malformed body and HTTP 401 for a wrong password.
#[salvo::async_trait]
impl salvo::Handler for SignInHandler {
    #[tracing::instrument(skip_all)]
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        _ctrl: &mut salvo::FlowCtrl,
    ) {
        let token = match self.sign_in(req).await {
            Ok(token) => token,
            Err(err) => {
                render_error(res, &err);
                return;
            }
        };

        let ttl_hours = get_config_from_depot(depot)
            .map(|settings| i64::from(settings.auth.token_ttl_hours))
            .unwrap_or(8);
        res.add_cookie(
            Cookie::build((TOKEN_COOKIE_NAME, token.clone()))
                .path("/")
                .same_site(SameSite::Strict)
                .max_age(salvo::http::cookie::time::Duration::hours(ttl_hours))
                .build(),
        );
        res.render(Json(SignInResponse { token }));
    }
}

#[must_use]
pub fn routes(authority: Option<Arc<TokenAuthority>>) -> Router {
    Router::with_path(SIGN_IN_ROUTE_COMPONENT).post(SignInHandler { authority })
}
