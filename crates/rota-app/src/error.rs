use rota_core::error::CoreError;
use rota_schedule::ScheduleError;
use rota_service::error::ServiceError;
use salvo::http::StatusCode;
use salvo::prelude::Json;
use salvo::{Depot, Request, Response, Writer, async_trait};
use serde_json::json;
use thiserror::Error;

/// Application-level errors (HTTP layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    ServiceError(#[from] ServiceError),

    #[error(transparent)]
    ScheduleError(#[from] ScheduleError),

    #[error(transparent)]
    CoreError(#[from] CoreError),

    /// Malformed query parameters, path parameters or request body.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

pub type AppResult<T> = std::result::Result<T, AppError>;

impl AppError {
    /// ## Summary
    /// Maps the error to the HTTP status reported to the client.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::ScheduleError(_) => StatusCode::BAD_REQUEST,
            Self::CoreError(err) => core_status(err),
            Self::ServiceError(err) => match err {
                ServiceError::ScheduleError(_) | ServiceError::ValidationError(_) => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::CoreError(err) => core_status(err),
                ServiceError::NotAuthenticated => StatusCode::UNAUTHORIZED,
                ServiceError::Forbidden(_) => StatusCode::FORBIDDEN,
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::ConflictDetected(_) => StatusCode::CONFLICT,
                ServiceError::StoreError(_)
                | ServiceError::InvalidConfiguration(_)
                | ServiceError::InvariantViolation(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// ## Summary
    /// Writes the status and a `{"msg": ...}` body. Server-side failures are
    /// logged and reported without their details.
    pub fn render(&self, res: &mut Response) {
        let status = self.status_code();
        let msg = if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
            "Internal server error".to_string()
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
            self.to_string()
        };
        res.status_code(status);
        res.render(Json(json!({ "msg": msg })));
    }
}

const fn core_status(err: &CoreError) -> StatusCode {
    match err {
        CoreError::InvalidInput(_) | CoreError::ValidationError(_) => StatusCode::BAD_REQUEST,
        CoreError::ConfigError(_) | CoreError::InvariantViolation(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

#[async_trait]
impl Writer for AppError {
    async fn write(self, _req: &mut Request, _depot: &mut Depot, res: &mut Response) {
        self.render(res);
    }
}
