//! Storage seams for assignment rules, shift types and employees.
//!
//! ## Module Organization
//!
//! - `employee`: directory record of an employee
//! - `error`: store and seed errors
//! - `filter`: rule selection criteria
//! - `memory`: `RwLock`-guarded in-memory implementation of every trait
//! - `seed`: JSON seed document loaded at startup

mod employee;
pub mod error;
mod filter;
mod memory;
mod seed;


use rota_core::{EmployeeId, RuleId, ShiftTypeId};
use rota_schedule::{AssignmentRule, ShiftType};

use crate::error::ServiceResult;

pub use employee::Employee;
pub use filter::RuleFilter;
pub use memory::MemoryStore;
pub use seed::Seed;

/// Precondition evaluated by a store right before it writes a rule.
///
/// Receives the rule about to be written and every stored rule of the same
/// employee. Runs while the store holds its write lock, so it must not call
/// back into the store.
pub type RuleCheck<'a> = dyn Fn(&AssignmentRule, &[AssignmentRule]) -> ServiceResult<()> + 'a;

/// Persistence of assignment rules.
pub trait RuleStore {
    /// ## Summary
    /// Lists the rules matching `filter`, in no particular order.
    ///
    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn list_rules(&self, filter: &RuleFilter) -> ServiceResult<Vec<AssignmentRule>>;

    /// ## Errors
    /// Returns an error if the store cannot be read.
    fn get_rule(&self, id: RuleId) -> ServiceResult<Option<AssignmentRule>>;

    /// ## Summary
    /// Stores a new rule once `check` accepts it.
    ///
    /// ## Errors
    /// Returns `ConflictDetected` if an active single assignment for the same
    /// employee, shift type and date exists, or whatever `check` returns.
    fn insert_rule(
        &self,
        rule: AssignmentRule,
        check: &RuleCheck<'_>,
    ) -> ServiceResult<AssignmentRule>;

    /// ## Summary
    /// Replaces the stored rule with the same id once `check` accepts it.
    ///
    /// ## Errors
    /// Returns `NotFound` if no rule has that id, plus the errors of
    /// [`Self::insert_rule`].
    fn replace_rule(
        &self,
        rule: AssignmentRule,
        check: &RuleCheck<'_>,
    ) -> ServiceResult<AssignmentRule>;
}

/// Read access to shift types.
pub trait ShiftTypeCatalog {
    /// ## Errors
    /// Returns an error if the catalog cannot be read.
    fn get_shift_type(&self, id: &ShiftTypeId) -> ServiceResult<Option<ShiftType>>;

    /// ## Errors
    /// Returns an error if the catalog cannot be read.
    fn list_shift_types(&self) -> ServiceResult<Vec<ShiftType>>;
}

/// Read access to the employee directory.
pub trait EmployeeDirectory {
    /// ## Errors
    /// Returns an error if the directory cannot be read.
    fn get_employee(&self, id: &EmployeeId) -> ServiceResult<Option<Employee>>;

    /// ## Errors
    /// Returns an error if the directory cannot be read.
    fn list_employees(&self) -> ServiceResult<Vec<Employee>>;

    /// ## Summary
    /// Employees whose direct manager is `manager_id`.
    ///
    /// ## Errors
    /// Returns an error if the directory cannot be read.
    fn direct_reports(&self, manager_id: &EmployeeId) -> ServiceResult<Vec<Employee>> {
        Ok(self
            .list_employees()?
            .into_iter()
            .filter(|employee| employee.reports_to(manager_id))
            .collect())
    }
}

/// Everything the schedule service needs from storage.
pub trait ScheduleStore: RuleStore + ShiftTypeCatalog + EmployeeDirectory + Send + Sync {}

impl<T> ScheduleStore for T where T: RuleStore + ShiftTypeCatalog + EmployeeDirectory + Send + Sync {}
