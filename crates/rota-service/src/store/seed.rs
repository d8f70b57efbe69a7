use std::path::Path;

use rota_schedule::{AssignmentRule, ShiftType};
use serde::Deserialize;

use super::employee::Employee;
use super::error::StoreResult;

/// Initial store contents, read from a JSON document of the form
/// `{ "employees": [...], "shiftTypes": [...], "rules": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seed {
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub shift_types: Vec<ShiftType>,
    #[serde(default)]
    pub rules: Vec<AssignmentRule>,
}

impl Seed {
    /// ## Errors
    /// Returns `SeedFormat` if the document is not a valid seed.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// ## Errors
    /// Returns `SeedIo` if the file cannot be read, or `SeedFormat` if it is
    /// not a valid seed.
    pub fn from_path(path: impl AsRef<Path>) -> StoreResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}
