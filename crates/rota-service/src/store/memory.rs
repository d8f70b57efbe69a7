use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use rota_core::{EmployeeId, RuleId, ShiftTypeId};
use rota_schedule::{AssignmentKind, AssignmentRule, ShiftType};

use super::employee::Employee;
use super::error::{StoreError, StoreResult};
use super::filter::RuleFilter;
use super::seed::Seed;
use super::{EmployeeDirectory, RuleCheck, RuleStore, ShiftTypeCatalog};
use crate::error::ServiceResult;

/// In-memory store guarding all state behind one `RwLock`.
///
/// Rule writes run their [`RuleCheck`] and the write itself under the same
/// write lock, so a conflict check can never race another write.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    employees: BTreeMap<EmployeeId, Employee>,
    shift_types: BTreeMap<ShiftTypeId, ShiftType>,
    rules: BTreeMap<RuleId, AssignmentRule>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// ## Summary
    /// Builds a store from seed data.
    ///
    /// Seeded rules must be valid and reference known employees and shift
    /// types. Active single assignments must be unique.
    ///
    /// ## Errors
    /// Returns `InvalidSeed` if a rule breaks one of these conditions.
    pub fn from_seed(seed: Seed) -> StoreResult<Self> {
        let store = Self::new();
        {
            let mut state = store.write()?;
            for employee in seed.employees {
                state.employees.insert(employee.id.clone(), employee);
            }
            for shift_type in seed.shift_types {
                state.shift_types.insert(shift_type.id.clone(), shift_type);
            }
            for rule in seed.rules {
                state.accept_seed_rule(rule)?;
            }

            tracing::debug!(
                employees = state.employees.len(),
                shift_types = state.shift_types.len(),
                rules = state.rules.len(),
                "Memory store seeded"
            );
        }
        Ok(store)
    }

    /// ## Summary
    /// Reads a JSON seed file and builds a store from it.
    ///
    /// ## Errors
    /// Returns an error if the file cannot be read or parsed, or holds invalid rules.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        tracing::info!(path = %path.display(), "Loading store seed");
        Self::from_seed(Seed::from_path(path)?)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, MemoryState>> {
        self.state
            .read()
            .map_err(|_poisoned| StoreError::LockPoisoned("memory store state"))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, MemoryState>> {
        self.state
            .write()
            .map_err(|_poisoned| StoreError::LockPoisoned("memory store state"))
    }
}

impl MemoryState {
    fn employee_rules(&self, employee_id: &EmployeeId) -> Vec<AssignmentRule> {
        self.rules
            .values()
            .filter(|rule| &rule.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// Active single assignments are unique per employee, shift type and date.
    fn ensure_single_unique(&self, rule: &AssignmentRule) -> StoreResult<()> {
        if !rule.is_active || rule.kind != AssignmentKind::Single {
            return Ok(());
        }
        let duplicate = self.rules.values().any(|other| {
            other.id != rule.id
                && other.is_active
                && other.kind == AssignmentKind::Single
                && other.employee_id == rule.employee_id
                && other.shift_type_id == rule.shift_type_id
                && other.start_date == rule.start_date
        });
        if duplicate {
            return Err(StoreError::DuplicateSingle(format!(
                "employee {} already has a single {} assignment on {}",
                rule.employee_id, rule.shift_type_id, rule.start_date
            )));
        }
        Ok(())
    }

    fn accept_seed_rule(&mut self, rule: AssignmentRule) -> StoreResult<()> {
        let invalid = |reason: String| StoreError::InvalidSeed(format!("rule {}: {reason}", rule.id));

        rule.validate().map_err(|err| invalid(err.to_string()))?;
        if !self.employees.contains_key(&rule.employee_id) {
            return Err(invalid(format!("unknown employee `{}`", rule.employee_id)));
        }
        if !self.shift_types.contains_key(&rule.shift_type_id) {
            return Err(invalid(format!("unknown shift type `{}`", rule.shift_type_id)));
        }
        if self.rules.contains_key(&rule.id) {
            return Err(invalid("duplicate rule id".to_string()));
        }
        self.ensure_single_unique(&rule)
            .map_err(|err| invalid(err.to_string()))?;

        self.rules.insert(rule.id, rule);
        Ok(())
    }

    fn commit(
        &mut self,
        rule: AssignmentRule,
        check: &RuleCheck<'_>,
    ) -> ServiceResult<AssignmentRule> {
        self.ensure_single_unique(&rule)?;
        check(&rule, &self.employee_rules(&rule.employee_id))?;
        self.rules.insert(rule.id, rule.clone());
        Ok(rule)
    }
}

impl RuleStore for MemoryStore {
    fn list_rules(&self, filter: &RuleFilter) -> ServiceResult<Vec<AssignmentRule>> {
        Ok(self
            .read()?
            .rules
            .values()
            .filter(|rule| filter.matches(rule))
            .cloned()
            .collect())
    }

    fn get_rule(&self, id: RuleId) -> ServiceResult<Option<AssignmentRule>> {
        Ok(self.read()?.rules.get(&id).cloned())
    }

    fn insert_rule(
        &self,
        rule: AssignmentRule,
        check: &RuleCheck<'_>,
    ) -> ServiceResult<AssignmentRule> {
        let mut state = self.write()?;
        if state.rules.contains_key(&rule.id) {
            return Err(StoreError::DuplicateRule(rule.id).into());
        }
        state.commit(rule, check)
    }

    fn replace_rule(
        &self,
        rule: AssignmentRule,
        check: &RuleCheck<'_>,
    ) -> ServiceResult<AssignmentRule> {
        let mut state = self.write()?;
        if !state.rules.contains_key(&rule.id) {
            return Err(StoreError::UnknownRule(rule.id).into());
        }
        state.commit(rule, check)
    }
}

impl ShiftTypeCatalog for MemoryStore {
    fn get_shift_type(&self, id: &ShiftTypeId) -> ServiceResult<Option<ShiftType>> {
        Ok(self.read()?.shift_types.get(id).cloned())
    }

    fn list_shift_types(&self) -> ServiceResult<Vec<ShiftType>> {
        Ok(self.read()?.shift_types.values().cloned().collect())
    }
}

impl EmployeeDirectory for MemoryStore {
    fn get_employee(&self, id: &EmployeeId) -> ServiceResult<Option<Employee>> {
        Ok(self.read()?.employees.get(id).cloned())
    }

    fn list_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.read()?.employees.values().cloned().collect())
    }
}
