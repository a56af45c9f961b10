use std::sync::Arc;

use salvo::Depot;
use salvo::http::header::AUTHORIZATION;

use planner_core::constants::TOKEN_COOKIE_NAME;
use planner_service::auth::TokenAuthority;
use planner_service::error::ServiceError;

use crate::error::{AppError, render_error};

/// ## Summary
/// Middleware handler for authentication.
/// Use this as a hoop on routes to protect them with the session token.
///
/// Built with the token authority derived from configuration; `None` means
/// no password is configured and every request passes.
pub struct AuthMiddleware {
    authority: Option<Arc<TokenAuthority>>,
}

impl AuthMiddleware {
    #[must_use]
    pub const fn new(authority: Option<Arc<TokenAuthority>>) -> Self {
        Self { authority }
    }
}

/// Session tokens offered by the request: an `Authorization: Bearer` header
/// first, then the `token` cookie.
fn request_tokens(req: &salvo::Request) -> Vec<String> {
    let bearer = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty());
    let cookie = req
        .cookie(TOKEN_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string());

    bearer.into_iter().chain(cookie).collect()
}

/// ## Summary
/// Verifies the session token before protected handlers run.
///
/// ## Errors
/// Returns an HTTP 401 Unauthorized response unless one of the offered
/// tokens verifies.
#[salvo::async_trait]
impl salvo::Handler for AuthMiddleware {
    #[tracing::instrument(skip(self, req, _depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        _depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        let Some(authority) = &self.authority else {
            tracing::trace!("Authentication disabled");
            return;
        };

        let tokens = request_tokens(req);
        let verified = tokens.iter().any(|token| authority.verify(token).is_ok());

        if !verified {
            tracing::debug!(offered = tokens.len(), "No valid session token");
            render_error(res, &AppError::from(ServiceError::NotAuthenticated));
            ctrl.skip_rest();
            return;
        }

        tracing::trace!("Request authenticated");
    }
}
