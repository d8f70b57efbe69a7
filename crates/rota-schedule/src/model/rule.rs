use std::collections::BTreeSet;

use chrono::{Months, NaiveDate};
use rota_core::{EmployeeId, RuleId, ShiftTypeId};
use serde::{Deserialize, Serialize};

use super::format;
use super::weekday::WeekdaySet;
use super::window::DateWindow;
use crate::error::{ScheduleError, ScheduleResult};

/// How an assignment rule recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentKind {
    Single,
    Daily,
    Weekly,
    Monthly,
    /// Open-ended; behaves like `Daily` unless refined by weekdays or a day of month.
    Permanent,
}

impl AssignmentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Permanent => "permanent",
        }
    }
}

impl std::fmt::Display for AssignmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The day-selection pattern a validated rule resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Once(NaiveDate),
    EveryDay,
    Weekdays(WeekdaySet),
    /// Day of month in 1..=31, clamped to the length of each month.
    DayOfMonth(u8),
}

/// A stored single or recurring shift assignment for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRule {
    #[serde(default = "RuleId::generate")]
    pub id: RuleId,
    pub employee_id: EmployeeId,
    pub shift_type_id: ShiftTypeId,
    #[serde(rename = "assignmentType")]
    pub kind: AssignmentKind,
    #[serde(deserialize_with = "format::lenient_date::deserialize")]
    pub start_date: NaiveDate,
    /// Inclusive; `None` means open-ended.
    #[serde(
        default,
        deserialize_with = "format::lenient_date_opt::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub days_of_week: WeekdaySet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_of_month: Option<u8>,
    /// Dates that never produce an occurrence even when the pattern matches.
    #[serde(default, deserialize_with = "format::lenient_date_set::deserialize")]
    pub exceptions: BTreeSet<NaiveDate>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<EmployeeId>,
}

/// Furthest an end date or exception may lie after the start date.
const MAX_RULE_SPAN: Months = Months::new(1200);

const fn default_active() -> bool {
    true
}

impl AssignmentRule {
    /// ## Summary
    /// Creates an active rule with a fresh id and no refinements.
    #[must_use]
    pub fn new(
        employee_id: impl Into<EmployeeId>,
        shift_type_id: impl Into<ShiftTypeId>,
        kind: AssignmentKind,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: RuleId::generate(),
            employee_id: employee_id.into(),
            shift_type_id: shift_type_id.into(),
            kind,
            start_date,
            end_date: None,
            days_of_week: WeekdaySet::EMPTY,
            day_of_month: None,
            exceptions: BTreeSet::new(),
            is_active: true,
            notes: None,
            assigned_by: None,
        }
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn with_days_of_week(mut self, days_of_week: WeekdaySet) -> Self {
        self.days_of_week = days_of_week;
        self
    }

    #[must_use]
    pub fn with_day_of_month(mut self, day_of_month: u8) -> Self {
        self.day_of_month = Some(day_of_month);
        self
    }

    #[must_use]
    pub fn with_exceptions(mut self, exceptions: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.exceptions.extend(exceptions);
        self
    }

    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    #[must_use]
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// ## Summary
    /// Checks the rule invariants.
    ///
    /// ## Errors
    /// Returns `InvalidRule` when the end date precedes the start date, an end
    /// date or exception lies more than 100 years past the start date, a weekly
    /// rule has no weekdays, a monthly rule lacks a valid day of month, or a
    /// permanent rule carries both refinements.
    pub fn validate(&self) -> ScheduleResult<()> {
        self.pattern().map(|_| ())
    }

    /// ## Summary
    /// Validates the rule and resolves the day-selection pattern it implies.
    ///
    /// `Permanent` resolves to every day unless `days_of_week` or
    /// `day_of_month` refines it. Refinement fields on other kinds are ignored.
    ///
    /// ## Errors
    /// Returns `InvalidRule` under the same conditions as [`Self::validate`].
    pub fn pattern(&self) -> ScheduleResult<Pattern> {
        if let Some(end_date) = self.end_date
            && end_date < self.start_date
        {
            return Err(ScheduleError::InvalidRule(format!(
                "end date {end_date} precedes start date {}",
                self.start_date
            )));
        }
        let furthest = self.end_date.into_iter().chain(self.exceptions.last().copied()).max();
        let limit = self.start_date.checked_add_months(MAX_RULE_SPAN);
        if let Some(furthest) = furthest
            && limit.is_none_or(|limit| furthest > limit)
        {
            return Err(ScheduleError::InvalidRule(format!(
                "date {furthest} lies more than 100 years after start date {}",
                self.start_date
            )));
        }

        match self.kind {
            AssignmentKind::Single => Ok(Pattern::Once(self.start_date)),
            AssignmentKind::Daily => Ok(Pattern::EveryDay),
            AssignmentKind::Weekly => {
                if self.days_of_week.is_empty() {
                    return Err(ScheduleError::InvalidRule(
                        "weekly rule requires at least one day of week".to_string(),
                    ));
                }
                Ok(Pattern::Weekdays(self.days_of_week))
            }
            AssignmentKind::Monthly => {
                let day = self.day_of_month.ok_or_else(|| {
                    ScheduleError::InvalidRule("monthly rule requires a day of month".to_string())
                })?;
                Ok(Pattern::DayOfMonth(check_day_of_month(day)?))
            }
            AssignmentKind::Permanent => match (self.days_of_week.is_empty(), self.day_of_month) {
                (true, None) => Ok(Pattern::EveryDay),
                (false, None) => Ok(Pattern::Weekdays(self.days_of_week)),
                (true, Some(day)) => Ok(Pattern::DayOfMonth(check_day_of_month(day)?)),
                (false, Some(_)) => Err(ScheduleError::InvalidRule(
                    "permanent rule may be refined by days of week or by day of month, not both"
                        .to_string(),
                )),
            },
        }
    }

    /// ## Summary
    /// Last day on which the rule can produce an occurrence, `None` when open-ended.
    #[must_use]
    pub fn last_possible_date(&self) -> Option<NaiveDate> {
        match self.kind {
            AssignmentKind::Single => Some(self.start_date),
            _ => self.end_date,
        }
    }

    /// ## Summary
    /// Intersects the rule's validity range with a query window.
    #[must_use]
    pub fn effective_window(&self, window: DateWindow) -> Option<DateWindow> {
        window.clamp(self.start_date, self.last_possible_date())
    }

    /// Whether the rule's validity range shares at least one day with `window`.
    #[must_use]
    pub fn overlaps(&self, window: DateWindow) -> bool {
        self.effective_window(window).is_some()
    }

    #[must_use]
    pub fn is_excepted(&self, date: NaiveDate) -> bool {
        self.exceptions.contains(&date)
    }
}

fn check_day_of_month(day: u8) -> ScheduleResult<u8> {
    if (1..=31).contains(&day) {
        Ok(day)
    } else {
        Err(ScheduleError::InvalidRule(format!(
            "day of month {day} is outside 1..=31"
        )))
    }
}
