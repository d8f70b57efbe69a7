//! Schedule authorization over the static role capability table.
//!
//! Visibility: employees see their own schedule, team leads and managers
//! additionally see their direct reports, HR and admins see everyone.
//! Management: team roles may write rules only for their direct reports.

use std::collections::BTreeSet;

use rota_core::{CallerContext, Capability, EmployeeId};

use crate::error::{ServiceError, ServiceResult};
use crate::store::{Employee, EmployeeDirectory};

/// Set of employees whose schedules a caller may read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    Everyone,
    Employees(BTreeSet<EmployeeId>),
}

impl Visibility {
    #[must_use]
    pub fn allows(&self, employee_id: &EmployeeId) -> bool {
        match self {
            Self::Everyone => true,
            Self::Employees(employees) => employees.contains(employee_id),
        }
    }
}

/// ## Summary
/// Resolves which employees' schedules `caller` may read.
///
/// ## Errors
/// Returns an error if the directory cannot be read.
pub fn visible_employees(
    caller: &CallerContext,
    directory: &(impl EmployeeDirectory + ?Sized),
) -> ServiceResult<Visibility> {
    if caller.can(Capability::ViewAllSchedules) {
        return Ok(Visibility::Everyone);
    }

    let mut employees = BTreeSet::new();
    if caller.can(Capability::ViewOwnSchedule) {
        employees.insert(caller.id.clone());
    }
    if caller.can(Capability::ViewTeamSchedules) {
        employees.extend(
            directory
                .direct_reports(&caller.id)?
                .into_iter()
                .map(|employee| employee.id),
        );
    }

    tracing::trace!(caller = %caller.id, visible = employees.len(), "Resolved schedule visibility");
    Ok(Visibility::Employees(employees))
}

/// ## Errors
/// Returns `Forbidden` if the caller's role lacks `capability`.
pub fn require_capability(caller: &CallerContext, capability: Capability) -> ServiceResult<()> {
    if caller.can(capability) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "role {} does not allow {capability:?}",
            caller.role
        )))
    }
}

/// Whether the caller may write any rule at all.
#[must_use]
pub fn can_manage_schedules(caller: &CallerContext) -> bool {
    caller.can(Capability::ManageAllSchedules) || caller.can(Capability::ManageTeamSchedules)
}

/// ## Summary
/// Checks that `caller` may create, update or deactivate rules of `employee`.
///
/// `employee` is `None` when the rule's employee is missing from the
/// directory; only organization-wide managers may touch such rules.
///
/// ## Errors
/// Returns `Forbidden` if the caller may not manage this employee's schedule.
pub fn require_manage(
    caller: &CallerContext,
    employee_id: &EmployeeId,
    employee: Option<&Employee>,
) -> ServiceResult<()> {
    if caller.can(Capability::ManageAllSchedules) {
        return Ok(());
    }
    let direct_report = employee.is_some_and(|employee| employee.reports_to(&caller.id));
    if caller.can(Capability::ManageTeamSchedules) && direct_report {
        return Ok(());
    }

    tracing::warn!(
        caller = %caller.id,
        role = %caller.role,
        employee_id = %employee_id,
        "Schedule management denied"
    );
    Err(ServiceError::Forbidden(format!(
        "{} may not manage the schedule of {employee_id}",
        caller.id
    )))
}
