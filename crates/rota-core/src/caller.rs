//! Caller identity and role-based capabilities.
//!
//! Roles form a closed set. Each role maps to a fixed capability set through
//! [`Role::capabilities`], which is the only place authorization rules live.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EmployeeId;

/// Organizational role of an authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Employee,
    TeamLeader,
    Manager,
    #[serde(rename = "HR")]
    Hr,
    Admin,
}

/// Something a caller may be allowed to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// See occurrences assigned to oneself.
    ViewOwnSchedule,
    /// See occurrences of one's direct reports.
    ViewTeamSchedules,
    /// See every employee's occurrences.
    ViewAllSchedules,
    /// Create, update and deactivate rules for one's direct reports.
    ManageTeamSchedules,
    /// Create, update and deactivate any rule.
    ManageAllSchedules,
    ViewShiftTypes,
    /// Includes seeing inactive shift types.
    ManageShiftTypes,
}

const EMPLOYEE_CAPABILITIES: &[Capability] =
    &[Capability::ViewOwnSchedule, Capability::ViewShiftTypes];

const TEAM_LEADER_CAPABILITIES: &[Capability] = &[
    Capability::ViewOwnSchedule,
    Capability::ViewTeamSchedules,
    Capability::ManageTeamSchedules,
    Capability::ViewShiftTypes,
];

const MANAGER_CAPABILITIES: &[Capability] = &[
    Capability::ViewOwnSchedule,
    Capability::ViewTeamSchedules,
    Capability::ManageTeamSchedules,
    Capability::ViewShiftTypes,
    Capability::ManageShiftTypes,
];

const ORGANIZATION_CAPABILITIES: &[Capability] = &[
    Capability::ViewOwnSchedule,
    Capability::ViewTeamSchedules,
    Capability::ViewAllSchedules,
    Capability::ManageTeamSchedules,
    Capability::ManageAllSchedules,
    Capability::ViewShiftTypes,
    Capability::ManageShiftTypes,
];

impl Role {
    pub const ALL: [Self; 5] = [
        Self::Employee,
        Self::TeamLeader,
        Self::Manager,
        Self::Hr,
        Self::Admin,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::TeamLeader => "TeamLeader",
            Self::Manager => "Manager",
            Self::Hr => "HR",
            Self::Admin => "Admin",
        }
    }

    /// ## Summary
    /// Returns the capability set granted to this role.
    #[must_use]
    pub const fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::Employee => EMPLOYEE_CAPABILITIES,
            Self::TeamLeader => TEAM_LEADER_CAPABILITIES,
            Self::Manager => MANAGER_CAPABILITIES,
            Self::Hr | Self::Admin => ORGANIZATION_CAPABILITIES,
        }
    }

    #[must_use]
    pub fn can(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    /// Parses a role name case-insensitively (`"hr"`, `"HR"`, `"teamleader"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::InvalidInput(format!("unknown role `{s}`")))
    }
}

/// The authenticated caller of a boundary operation.
///
/// Passed explicitly into every service function that authorizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    pub id: EmployeeId,
    pub role: Role,
}

impl CallerContext {
    #[must_use]
    pub fn new(id: impl Into<EmployeeId>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        self.role.can(capability)
    }
}
