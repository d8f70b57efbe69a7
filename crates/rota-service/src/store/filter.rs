use std::collections::BTreeSet;

use rota_core::EmployeeId;
use rota_schedule::{AssignmentRule, DateWindow};

/// Selects rules from a [`super::RuleStore`].
///
/// The default filter matches every stored rule.
#[derive(Debug, Clone, Default)]
pub struct RuleFilter {
    /// `None` matches every employee.
    pub employees: Option<BTreeSet<EmployeeId>>,
    pub active_only: bool,
    /// Keeps rules whose validity range shares a day with the window.
    pub window: Option<DateWindow>,
}

impl RuleFilter {
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_employees(mut self, employees: impl IntoIterator<Item = EmployeeId>) -> Self {
        self.employees = Some(employees.into_iter().collect());
        self
    }

    #[must_use]
    pub fn for_employee(self, employee_id: EmployeeId) -> Self {
        self.for_employees([employee_id])
    }

    #[must_use]
    pub const fn only_active(mut self) -> Self {
        self.active_only = true;
        self
    }

    #[must_use]
    pub const fn overlapping(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }

    #[must_use]
    pub fn matches(&self, rule: &AssignmentRule) -> bool {
        if self.active_only && !rule.is_active {
            return false;
        }
        if let Some(employees) = &self.employees
            && !employees.contains(&rule.employee_id)
        {
            return false;
        }
        self.window.is_none_or(|window| rule.overlaps(window))
    }
}
