//! Recurrence expansion: one rule plus a query window in, concrete occurrences out.

use chrono::{Datelike, Months, NaiveDate};

use crate::error::ScheduleResult;
use crate::model::{AssignmentRule, DateWindow, Occurrence, Pattern};

/// ## Summary
/// Expands a rule into its occurrences within `[window_start, window_end]`.
///
/// Inactive rules yield an empty sequence, so this is safe to call on every
/// stored rule. Output is in ascending date order.
///
/// ## Errors
/// Returns `InvalidWindow` if `window_start > window_end`, and `InvalidRule`
/// if an active rule violates its invariants. Nothing is produced on error.
pub fn expand(
    rule: &AssignmentRule,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> ScheduleResult<Vec<Occurrence>> {
    let window = DateWindow::new(window_start, window_end)?;
    expand_in(rule, window)
}

/// ## Summary
/// Expands a rule over an already validated window.
///
/// ## Errors
/// Returns `InvalidRule` if an active rule violates its invariants.
pub fn expand_in(rule: &AssignmentRule, window: DateWindow) -> ScheduleResult<Vec<Occurrence>> {
    if !rule.is_active {
        tracing::trace!(rule_id = %rule.id, "Skipping inactive rule");
        return Ok(Vec::new());
    }

    let pattern = rule.pattern()?;

    let Some(effective) = rule.effective_window(window) else {
        tracing::trace!(rule_id = %rule.id, "Rule does not overlap window");
        return Ok(Vec::new());
    };

    let candidates: Vec<NaiveDate> = match pattern {
        Pattern::Once(date) => window.contains(date).then_some(date).into_iter().collect(),
        Pattern::EveryDay => effective.days().collect(),
        Pattern::Weekdays(days) => effective
            .days()
            .filter(|date| days.contains(date.weekday()))
            .collect(),
        Pattern::DayOfMonth(day) => monthly_dates(effective, day),
    };

    let occurrences: Vec<Occurrence> = candidates
        .into_iter()
        .filter(|date| !rule.is_excepted(*date))
        .map(|date| Occurrence::from_rule(rule, date))
        .collect();

    tracing::trace!(
        rule_id = %rule.id,
        kind = %rule.kind,
        window_start = %effective.start(),
        window_end = %effective.end(),
        count = occurrences.len(),
        "Expanded rule"
    );

    Ok(occurrences)
}

/// ## Summary
/// Orders merged occurrences by date, then employee, then source rule.
pub fn sort_occurrences(occurrences: &mut [Occurrence]) {
    occurrences.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.employee_id.cmp(&b.employee_id))
            .then_with(|| a.rule_id.cmp(&b.rule_id))
    });
}

/// Dates inside `range` that fall on `day` of their month, clamped to the
/// last day of shorter months.
fn monthly_dates(range: DateWindow, day: u8) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let Some(mut month_start) = range.start().with_day(1) else {
        return dates;
    };

    while month_start <= range.end() {
        let next_month = month_start.checked_add_months(Months::new(1));
        let month_len = next_month
            .and_then(|next| next.pred_opt())
            .map_or(31, |last| last.day());
        let target_day = u32::from(day).min(month_len);

        if let Some(target) = month_start.with_day(target_day)
            && range.contains(target)
        {
            dates.push(target);
        }

        let Some(next_month) = next_month else {
            break;
        };
        month_start = next_month;
    }

    dates
}
