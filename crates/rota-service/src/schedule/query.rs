use std::collections::BTreeSet;

use chrono::NaiveDate;
use rota_core::config::ScheduleConfig;
use rota_core::{CallerContext, EmployeeId};
use rota_schedule::{DateWindow, Occurrence, ScheduleError, expand_in, sort_occurrences};
use serde::Serialize;

use crate::auth::{Visibility, visible_employees};
use crate::error::{ServiceError, ServiceResult};
use crate::store::{RuleFilter, ScheduleStore};

/// Parameters of a schedule window query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleQuery {
    pub view_start_date: NaiveDate,
    pub view_end_date: NaiveDate,
    pub employee_id: Option<EmployeeId>,
    pub department: Option<String>,
    /// 1-based page number, defaults to 1.
    pub page: Option<usize>,
    /// Page size, defaults to `schedule.default_page_size`.
    pub limit: Option<usize>,
}

impl ScheduleQuery {
    #[must_use]
    pub const fn new(view_start_date: NaiveDate, view_end_date: NaiveDate) -> Self {
        Self {
            view_start_date,
            view_end_date,
            employee_id: None,
            department: None,
            page: None,
            limit: None,
        }
    }
}

/// One page of merged occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpandedSchedulePage {
    pub expanded_schedules: Vec<Occurrence>,
    pub total_pages: usize,
    pub current_page: usize,
    pub total_schedules: usize,
}

/// ## Summary
/// Expands every visible active rule over the query window, merges and
/// sorts the occurrences, then returns the requested page.
///
/// ## Errors
/// Returns `InvalidWindow` for an inverted or over-wide window,
/// `ValidationError` for a zero page or limit, and `Forbidden` when the
/// requested employee is not visible to the caller.
#[tracing::instrument(skip(store, caller, limits), fields(caller = %caller.id))]
pub fn list_schedules(
    store: &(impl ScheduleStore + ?Sized),
    caller: &CallerContext,
    limits: &ScheduleConfig,
    query: &ScheduleQuery,
) -> ServiceResult<ExpandedSchedulePage> {
    let window = DateWindow::new(query.view_start_date, query.view_end_date)?;
    if window.len_days() > i64::from(limits.max_window_days) {
        return Err(ScheduleError::InvalidWindow(format!(
            "window of {} days exceeds the maximum of {}",
            window.len_days(),
            limits.max_window_days
        ))
        .into());
    }

    let page = query.page.unwrap_or(1);
    let limit = query
        .limit
        .unwrap_or(limits.default_page_size)
        .min(limits.max_page_size);
    if page == 0 || limit == 0 {
        return Err(ServiceError::ValidationError(
            "page and limit must be at least 1".to_string(),
        ));
    }

    let filter = rule_filter(store, caller, query)?.only_active().overlapping(window);
    let rules = store.list_rules(&filter)?;

    let mut occurrences = Vec::new();
    for rule in &rules {
        match expand_in(rule, window) {
            Ok(expanded) => occurrences.extend(expanded),
            Err(err) => {
                tracing::warn!(rule_id = %rule.id, error = %err, "Skipping stored rule that fails to expand");
            }
        }
    }
    sort_occurrences(&mut occurrences);

    let total_schedules = occurrences.len();
    let total_pages = total_schedules.div_ceil(limit);
    let expanded_schedules: Vec<Occurrence> = occurrences
        .into_iter()
        .skip((page - 1).saturating_mul(limit))
        .take(limit)
        .collect();

    tracing::debug!(
        rules = rules.len(),
        total_schedules,
        page,
        returned = expanded_schedules.len(),
        "Schedule query expanded"
    );

    Ok(ExpandedSchedulePage {
        expanded_schedules,
        total_pages,
        current_page: page,
        total_schedules,
    })
}

/// Narrows the rule filter to the employees the caller may see and asked for.
fn rule_filter(
    store: &(impl ScheduleStore + ?Sized),
    caller: &CallerContext,
    query: &ScheduleQuery,
) -> ServiceResult<RuleFilter> {
    let visibility = visible_employees(caller, store)?;

    if let Some(employee_id) = &query.employee_id {
        if !visibility.allows(employee_id) {
            return Err(ServiceError::Forbidden(format!(
                "{} may not view the schedule of {employee_id}",
                caller.id
            )));
        }
        return Ok(RuleFilter::all().for_employee(employee_id.clone()));
    }

    let Some(department) = query.department.as_deref() else {
        return Ok(match visibility {
            Visibility::Everyone => RuleFilter::all(),
            Visibility::Employees(employees) => RuleFilter::all().for_employees(employees),
        });
    };

    let in_department: BTreeSet<EmployeeId> = store
        .list_employees()?
        .into_iter()
        .filter(|employee| employee.in_department(department) && visibility.allows(&employee.id))
        .map(|employee| employee.id)
        .collect();
    Ok(RuleFilter::all().for_employees(in_department))
}
