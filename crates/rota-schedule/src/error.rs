use thiserror::Error;

/// Validation failures raised by rule expansion and conflict checks.
///
/// Both variants are caller errors; nothing here is transient.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Invalid window: {0}")]
    InvalidWindow(String),
}

pub type ScheduleResult<T> = std::result::Result<T, ScheduleError>;
