//! Conflict detection between assignment rules of the same employee.
//!
//! Two rules conflict when some occurrence of one and some occurrence of the
//! other cover overlapping stretches of absolute time. Occurrences come from
//! [`crate::expand`], so the check honours exceptions and refinements exactly
//! as queries do. Shift intervals are half-open: a shift ending at 15:00 does
//! not collide with one starting at 15:00.

use std::collections::HashMap;
use std::hash::BuildHasher;

use chrono::{Months, NaiveDate, NaiveDateTime};
use rota_core::{RuleId, ShiftTypeId};

use crate::error::{ScheduleError, ScheduleResult};
use crate::expand::expand_in;
use crate::model::{AssignmentRule, DateWindow, ShiftTime, ShiftType};

/// How far past the last irregularity two rules are compared.
///
/// Every rule pattern repeats well within this span.
const COMPARISON_HORIZON: Months = Months::new(60);

/// Resolves the time of day of a shift type.
pub trait ShiftTimeLookup {
    fn shift_time(&self, shift_type_id: &ShiftTypeId) -> Option<ShiftTime>;
}

impl<S: BuildHasher> ShiftTimeLookup for HashMap<ShiftTypeId, ShiftTime, S> {
    fn shift_time(&self, shift_type_id: &ShiftTypeId) -> Option<ShiftTime> {
        self.get(shift_type_id).copied()
    }
}

impl ShiftTimeLookup for [ShiftType] {
    fn shift_time(&self, shift_type_id: &ShiftTypeId) -> Option<ShiftTime> {
        self.iter()
            .find(|shift_type| &shift_type.id == shift_type_id)
            .map(ShiftType::shift_time)
    }
}

/// ## Summary
/// Returns whether `candidate` would overlap any rule in `existing`.
///
/// Only active rules of the same employee are compared. The rule named by
/// `exclude`, and any rule sharing the candidate's id, is skipped so that an
/// update is not checked against its own stored version.
///
/// ## Errors
/// Returns `InvalidRule` if a compared rule is malformed or references a
/// shift type the lookup does not know.
pub fn has_conflict(
    candidate: &AssignmentRule,
    existing: &[AssignmentRule],
    exclude: Option<RuleId>,
    shift_times: &(impl ShiftTimeLookup + ?Sized),
) -> ScheduleResult<bool> {
    find_conflict(candidate, existing, exclude, shift_times).map(|found| found.is_some())
}

/// ## Summary
/// Like [`has_conflict`], but returns the first conflicting rule.
///
/// ## Errors
/// Returns `InvalidRule` under the same conditions as [`has_conflict`].
pub fn find_conflict<'a>(
    candidate: &AssignmentRule,
    existing: &'a [AssignmentRule],
    exclude: Option<RuleId>,
    shift_times: &(impl ShiftTimeLookup + ?Sized),
) -> ScheduleResult<Option<&'a AssignmentRule>> {
    if !candidate.is_active {
        return Ok(None);
    }
    candidate.validate()?;
    let candidate_shift = resolve_shift(shift_times, &candidate.shift_type_id)?;

    let others = existing.iter().filter(|other| {
        other.is_active
            && other.id != candidate.id
            && Some(other.id) != exclude
            && other.employee_id == candidate.employee_id
    });

    for other in others {
        let other_shift = resolve_shift(shift_times, &other.shift_type_id)?;
        if rules_conflict(candidate, candidate_shift, other, other_shift)? {
            tracing::debug!(
                employee_id = %candidate.employee_id,
                candidate = %candidate.id,
                conflicting = %other.id,
                "Shift conflict detected"
            );
            return Ok(Some(other));
        }
    }

    Ok(None)
}

/// ## Summary
/// Compares two rules with already resolved shift times.
///
/// ## Errors
/// Returns `InvalidRule` if either rule is malformed.
pub fn rules_conflict(
    a: &AssignmentRule,
    a_shift: ShiftTime,
    b: &AssignmentRule,
    b_shift: ShiftTime,
) -> ScheduleResult<bool> {
    if !a.is_active || !b.is_active || a.employee_id != b.employee_id {
        return Ok(false);
    }
    a.validate()?;
    b.validate()?;

    let start = a.start_date.max(b.start_date);
    // A pair that has not met by the horizon never meets, so long bounded
    // rules are cut there as well.
    let end = [coverage_end(a, a_shift), coverage_end(b, b_shift)]
        .into_iter()
        .flatten()
        .fold(comparison_horizon(start, a, b), NaiveDate::min);
    if start > end {
        return Ok(false);
    }

    // Start one day early so an overnight occurrence spilling into `start` is seen.
    let window = DateWindow::new(start.pred_opt().unwrap_or(start), end)?;
    let a_intervals = intervals(a, a_shift, window)?;
    let b_intervals = intervals(b, b_shift, window)?;

    Ok(any_overlap(&a_intervals, &b_intervals))
}

fn resolve_shift(
    shift_times: &(impl ShiftTimeLookup + ?Sized),
    shift_type_id: &ShiftTypeId,
) -> ScheduleResult<ShiftTime> {
    shift_times
        .shift_time(shift_type_id)
        .ok_or_else(|| ScheduleError::InvalidRule(format!("unknown shift type `{shift_type_id}`")))
}

/// Last day touched by the rule's shifts, one past its last date for overnight shifts.
fn coverage_end(rule: &AssignmentRule, shift: ShiftTime) -> Option<NaiveDate> {
    rule.last_possible_date().map(|last| {
        if shift.crosses_midnight() {
            last.succ_opt().unwrap_or(last)
        } else {
            last
        }
    })
}

fn comparison_horizon(start: NaiveDate, a: &AssignmentRule, b: &AssignmentRule) -> NaiveDate {
    let anchor = [a.exceptions.last(), b.exceptions.last()]
        .into_iter()
        .flatten()
        .copied()
        .fold(start, NaiveDate::max);
    anchor
        .checked_add_months(COMPARISON_HORIZON)
        .unwrap_or(NaiveDate::MAX)
}

fn intervals(
    rule: &AssignmentRule,
    shift: ShiftTime,
    window: DateWindow,
) -> ScheduleResult<Vec<(NaiveDateTime, NaiveDateTime)>> {
    Ok(expand_in(rule, window)?
        .iter()
        .map(|occurrence| shift.interval_on(occurrence.date))
        .collect())
}

/// Sweeps two ascending lists of disjoint half-open intervals.
fn any_overlap(
    a: &[(NaiveDateTime, NaiveDateTime)],
    b: &[(NaiveDateTime, NaiveDateTime)],
) -> bool {
    let (mut i, mut j) = (0, 0);
    while let (Some(&(a_start, a_end)), Some(&(b_start, b_end))) = (a.get(i), b.get(j)) {
        if a_start < b_end && b_start < a_end {
            return true;
        }
        if a_end <= b_end {
            i += 1;
        } else {
            j += 1;
        }
    }
    false
}
