use rota_core::{EmployeeId, Role};
use serde::{Deserialize, Serialize};

/// Directory record of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    /// Direct manager or team leader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<EmployeeId>,
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}

impl Employee {
    #[must_use]
    pub fn new(id: impl Into<EmployeeId>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: None,
            manager_id: None,
            role,
            is_active: true,
        }
    }

    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    #[must_use]
    pub fn with_manager(mut self, manager_id: impl Into<EmployeeId>) -> Self {
        self.manager_id = Some(manager_id.into());
        self
    }

    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    #[must_use]
    pub fn reports_to(&self, manager_id: &EmployeeId) -> bool {
        self.manager_id.as_ref() == Some(manager_id)
    }

    /// Department comparison ignoring case and surrounding whitespace.
    #[must_use]
    pub fn in_department(&self, department: &str) -> bool {
        self.department
            .as_deref()
            .is_some_and(|own| own.trim().eq_ignore_ascii_case(department.trim()))
    }
}
