use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;
use rota_core::{CallerContext, EmployeeId, RuleId, ShiftTypeId};
use rota_schedule::model::format;
use rota_schedule::{
    AssignmentKind, AssignmentRule, ShiftTime, ShiftTimeLookup, ShiftType, WeekdaySet,
    find_conflict,
};
use serde::Deserialize;

use crate::auth::{can_manage_schedules, require_manage, visible_employees};
use crate::error::{ServiceError, ServiceResult};
use crate::store::{Employee, ScheduleStore};

/// Body of a rule creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRule {
    pub employee_id: EmployeeId,
    pub shift_type_id: ShiftTypeId,
    #[serde(rename = "assignmentType")]
    pub kind: AssignmentKind,
    #[serde(deserialize_with = "format::lenient_date::deserialize")]
    pub start_date: NaiveDate,
    #[serde(default, deserialize_with = "format::lenient_date_opt::deserialize")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub days_of_week: WeekdaySet,
    #[serde(default)]
    pub day_of_month: Option<u8>,
    #[serde(default, deserialize_with = "format::lenient_date_set::deserialize")]
    pub exceptions: BTreeSet<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewRule {
    fn into_rule(self, assigned_by: &EmployeeId) -> AssignmentRule {
        let mut rule = AssignmentRule::new(self.employee_id, self.shift_type_id, self.kind, self.start_date)
            .with_days_of_week(self.days_of_week)
            .with_exceptions(self.exceptions);
        rule.end_date = self.end_date;
        rule.day_of_month = self.day_of_month;
        rule.notes = self.notes;
        rule.assigned_by = Some(assigned_by.clone());
        drop_unused_refinements(&mut rule);
        rule
    }
}

/// Body of a rule update request.
///
/// Absent fields keep their stored value, except `endDate`: an absent end
/// date makes the rule open-ended. An explicit `null` day of month clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleUpdate {
    #[serde(default)]
    pub shift_type_id: Option<ShiftTypeId>,
    #[serde(default, rename = "assignmentType")]
    pub kind: Option<AssignmentKind>,
    #[serde(default, deserialize_with = "format::lenient_date_opt::deserialize")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "format::lenient_date_opt::deserialize")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub days_of_week: Option<WeekdaySet>,
    #[serde(default, deserialize_with = "format::nullable::deserialize")]
    pub day_of_month: Option<Option<u8>>,
    #[serde(default, deserialize_with = "format::lenient_date_set_opt::deserialize")]
    pub exceptions: Option<BTreeSet<NaiveDate>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl RuleUpdate {
    fn apply(self, mut rule: AssignmentRule, assigned_by: &EmployeeId) -> AssignmentRule {
        if let Some(shift_type_id) = self.shift_type_id {
            rule.shift_type_id = shift_type_id;
        }
        if let Some(kind) = self.kind {
            rule.kind = kind;
        }
        if let Some(start_date) = self.start_date {
            rule.start_date = start_date;
        }
        rule.end_date = self.end_date;
        if let Some(days_of_week) = self.days_of_week {
            rule.days_of_week = days_of_week;
        }
        if let Some(day_of_month) = self.day_of_month {
            rule.day_of_month = day_of_month;
        }
        if let Some(exceptions) = self.exceptions {
            rule.exceptions = exceptions;
        }
        if let Some(notes) = self.notes {
            rule.notes = Some(notes);
        }
        if let Some(is_active) = self.is_active {
            rule.is_active = is_active;
        }
        rule.assigned_by = Some(assigned_by.clone());
        drop_unused_refinements(&mut rule);
        rule
    }
}

/// Clears refinement fields the rule's kind does not read.
fn drop_unused_refinements(rule: &mut AssignmentRule) {
    match rule.kind {
        AssignmentKind::Single | AssignmentKind::Daily => {
            rule.days_of_week = WeekdaySet::EMPTY;
            rule.day_of_month = None;
        }
        AssignmentKind::Weekly => rule.day_of_month = None,
        AssignmentKind::Monthly => rule.days_of_week = WeekdaySet::EMPTY,
        AssignmentKind::Permanent => {}
    }
}

/// ## Summary
/// Validates and stores a new rule assigned by `caller`.
///
/// ## Errors
/// - `Forbidden` if the caller may not manage the employee's schedule
/// - `NotFound` if the employee or shift type does not exist
/// - `ValidationError` if either is inactive
/// - `InvalidRule` if the rule breaks its invariants
/// - `ConflictDetected` if it overlaps another active rule of the employee
#[tracing::instrument(skip(store, caller, new_rule), fields(
    caller = %caller.id,
    employee_id = %new_rule.employee_id,
    kind = %new_rule.kind
))]
pub fn create_rule(
    store: &(impl ScheduleStore + ?Sized),
    caller: &CallerContext,
    new_rule: NewRule,
) -> ServiceResult<AssignmentRule> {
    require_any_management(caller)?;

    let employee = store
        .get_employee(&new_rule.employee_id)?
        .ok_or_else(|| ServiceError::NotFound(format!("employee {}", new_rule.employee_id)))?;
    require_manage(caller, &employee.id, Some(&employee))?;
    ensure_employee_active(&employee)?;

    let shift_type = require_shift_type(store, &new_rule.shift_type_id)?;
    ensure_shift_type_active(&shift_type)?;

    let rule = new_rule.into_rule(&caller.id);
    rule.validate()?;

    let shift_times = shift_time_table(store)?;
    let stored = store.insert_rule(rule, &|candidate, existing| {
        ensure_no_conflict(candidate, existing, &shift_times)
    })?;

    tracing::info!(rule_id = %stored.id, "Schedule rule created");
    Ok(stored)
}

/// ## Errors
/// Returns `NotFound` if the rule does not exist, or `Forbidden` if its
/// employee's schedule is not visible to the caller.
#[tracing::instrument(skip(store, caller), fields(caller = %caller.id))]
pub fn get_rule(
    store: &(impl ScheduleStore + ?Sized),
    caller: &CallerContext,
    rule_id: RuleId,
) -> ServiceResult<AssignmentRule> {
    let rule = require_rule(store, rule_id)?;
    if !visible_employees(caller, store)?.allows(&rule.employee_id) {
        return Err(ServiceError::Forbidden(format!(
            "{} may not view the schedule of {}",
            caller.id, rule.employee_id
        )));
    }
    Ok(rule)
}

/// ## Summary
/// Applies `update` to a stored rule and re-checks it for conflicts against
/// the employee's other rules.
///
/// ## Errors
/// Returns `NotFound` if the rule or a newly referenced shift type does not
/// exist, plus the errors of [`create_rule`].
#[tracing::instrument(skip(store, caller, update), fields(caller = %caller.id))]
pub fn update_rule(
    store: &(impl ScheduleStore + ?Sized),
    caller: &CallerContext,
    rule_id: RuleId,
    update: RuleUpdate,
) -> ServiceResult<AssignmentRule> {
    require_any_management(caller)?;

    let current = require_rule(store, rule_id)?;
    let employee = store.get_employee(&current.employee_id)?;
    require_manage(caller, &current.employee_id, employee.as_ref())?;

    let shift_type_changed = update
        .shift_type_id
        .as_ref()
        .is_some_and(|shift_type_id| shift_type_id != &current.shift_type_id);
    let updated = update.apply(current, &caller.id);

    let shift_type = require_shift_type(store, &updated.shift_type_id)?;
    if shift_type_changed {
        ensure_shift_type_active(&shift_type)?;
    }
    updated.validate()?;

    let shift_times = shift_time_table(store)?;
    let stored = store.replace_rule(updated, &|candidate, existing| {
        ensure_no_conflict(candidate, existing, &shift_times)
    })?;

    tracing::info!(rule_id = %stored.id, is_active = stored.is_active, "Schedule rule updated");
    Ok(stored)
}

/// ## Summary
/// Soft-deletes a rule by clearing its active flag. Deactivating an inactive
/// rule succeeds without change to its pattern.
///
/// ## Errors
/// Returns `NotFound` if the rule does not exist, or `Forbidden` if the
/// caller may not manage its employee's schedule.
#[tracing::instrument(skip(store, caller), fields(caller = %caller.id))]
pub fn deactivate_rule(
    store: &(impl ScheduleStore + ?Sized),
    caller: &CallerContext,
    rule_id: RuleId,
) -> ServiceResult<AssignmentRule> {
    require_any_management(caller)?;

    let mut rule = require_rule(store, rule_id)?;
    let employee = store.get_employee(&rule.employee_id)?;
    require_manage(caller, &rule.employee_id, employee.as_ref())?;

    rule.is_active = false;
    rule.assigned_by = Some(caller.id.clone());
    let stored = store.replace_rule(rule, &|_, _| Ok(()))?;

    tracing::info!(rule_id = %stored.id, "Schedule rule deactivated");
    Ok(stored)
}

fn require_any_management(caller: &CallerContext) -> ServiceResult<()> {
    if can_manage_schedules(caller) {
        Ok(())
    } else {
        Err(ServiceError::Forbidden(format!(
            "role {} may not manage schedules",
            caller.role
        )))
    }
}

fn require_rule(
    store: &(impl ScheduleStore + ?Sized),
    rule_id: RuleId,
) -> ServiceResult<AssignmentRule> {
    store
        .get_rule(rule_id)?
        .ok_or_else(|| ServiceError::NotFound(format!("schedule rule {rule_id}")))
}

fn require_shift_type(
    store: &(impl ScheduleStore + ?Sized),
    shift_type_id: &ShiftTypeId,
) -> ServiceResult<ShiftType> {
    store
        .get_shift_type(shift_type_id)?
        .ok_or_else(|| ServiceError::NotFound(format!("shift type {shift_type_id}")))
}

fn ensure_employee_active(employee: &Employee) -> ServiceResult<()> {
    if employee.is_active {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(format!(
            "cannot assign shifts to inactive employee {}",
            employee.id
        )))
    }
}

fn ensure_shift_type_active(shift_type: &ShiftType) -> ServiceResult<()> {
    if shift_type.is_active {
        Ok(())
    } else {
        Err(ServiceError::ValidationError(format!(
            "cannot assign inactive shift type {}",
            shift_type.id
        )))
    }
}

/// Snapshot of every shift type's times, taken before the store's write lock.
fn shift_time_table(
    store: &(impl ScheduleStore + ?Sized),
) -> ServiceResult<HashMap<ShiftTypeId, ShiftTime>> {
    Ok(store
        .list_shift_types()?
        .into_iter()
        .map(|shift_type| (shift_type.id.clone(), shift_type.shift_time()))
        .collect())
}

fn ensure_no_conflict(
    candidate: &AssignmentRule,
    existing: &[AssignmentRule],
    shift_times: &impl ShiftTimeLookup,
) -> ServiceResult<()> {
    match find_conflict(candidate, existing, Some(candidate.id), shift_times)? {
        None => Ok(()),
        Some(other) => {
            tracing::warn!(
                rule_id = %candidate.id,
                conflicting = %other.id,
                employee_id = %candidate.employee_id,
                "Rejecting conflicting schedule rule"
            );
            Err(ServiceError::ConflictDetected(format!(
                "employee {} already works an overlapping shift under {} rule {}",
                candidate.employee_id, other.kind, other.id
            )))
        }
    }
}
