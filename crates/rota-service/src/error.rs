use thiserror::Error;

use crate::store::error::StoreError;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    ScheduleError(#[from] rota_schedule::ScheduleError),

    #[error(transparent)]
    CoreError(#[from] rota_core::error::CoreError),

    #[error(transparent)]
    StoreError(StoreError),

    #[error("Conflict detected: {0}")]
    ConflictDetected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateSingle(msg) => Self::ConflictDetected(msg),
            StoreError::UnknownRule(id) => Self::NotFound(format!("schedule rule {id}")),
            StoreError::LockPoisoned(what) => Self::InvariantViolation(what),
            other => Self::StoreError(other),
        }
    }
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
