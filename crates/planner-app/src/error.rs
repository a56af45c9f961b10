use salvo::http::StatusCode;
use salvo::writing::Json;
use serde::Serialize;
use thiserror::Error;

use planner_service::error::ServiceError;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    DatabaseError(#[from] planner_db::error::DbError),

    #[error(transparent)]
    RepeatError(#[from] planner_repeat::RepeatError),

    #[error(transparent)]
    CoreError(#[from] planner_core::error::CoreError),

    #[error("Invalid request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

/// ## Summary
/// Error response payload
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceError(err) => match err {
                ServiceError::ValidationError(_) | ServiceError::RepeatError(_) => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                ServiceError::DatabaseError(_)
                | ServiceError::CoreError(_)
                | ServiceError::DieselError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::RepeatError(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::DatabaseError(_) | Self::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show a client. Server-side failures are not described.
    #[must_use]
    pub fn public_message(&self) -> String {
        if self.status_code().is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        }
    }
}

/// ## Summary
/// Writes `err` as a JSON `{"error": ...}` body with its status code.
pub fn render_error(res: &mut salvo::Response, err: &AppError) {
    let status = err.status_code();
    if status.is_server_error() {
        tracing::error!(error = ?err, "Request failed");
    } else {
        tracing::debug!(error = %err, %status, "Request rejected");
    }

    res.status_code(status);
    res.render(Json(ErrorResponse {
        error: err.public_message(),
    }));
}
