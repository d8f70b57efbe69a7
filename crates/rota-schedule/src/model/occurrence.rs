use chrono::NaiveDate;
use rota_core::{EmployeeId, RuleId, ShiftTypeId};
use serde::{Deserialize, Serialize};

use super::rule::AssignmentRule;

/// One concrete calendar day on which an employee works under a rule.
///
/// Computed on demand for a query window and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// The rule this occurrence was expanded from.
    pub rule_id: RuleId,
    pub employee_id: EmployeeId,
    pub shift_type_id: ShiftTypeId,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Occurrence {
    #[must_use]
    pub fn from_rule(rule: &AssignmentRule, date: NaiveDate) -> Self {
        Self {
            rule_id: rule.id,
            employee_id: rule.employee_id.clone(),
            shift_type_id: rule.shift_type_id.clone(),
            date,
            notes: rule.notes.clone(),
        }
    }
}
