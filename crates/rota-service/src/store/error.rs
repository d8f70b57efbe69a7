use rota_core::RuleId;
use thiserror::Error;

/// Errors raised by rule stores and seed loading.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error("{0}")]
    DuplicateSingle(String),

    #[error("Schedule rule {0} does not exist")]
    UnknownRule(RuleId),

    #[error("Schedule rule {0} already exists")]
    DuplicateRule(RuleId),

    #[error("Failed to read seed file: {0}")]
    SeedIo(#[from] std::io::Error),

    #[error("Malformed seed file: {0}")]
    SeedFormat(#[from] serde_json::Error),

    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
