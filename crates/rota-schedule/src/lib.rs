//! Assignment-rule model and the pure scheduling algorithms built on it.
//!
//! ## Module Organization
//!
//! - `model`: assignment rules, shift types, occurrences and date windows
//! - `expand`: turns one rule plus a query window into concrete occurrences
//! - `conflict`: detects overlapping shifts between rules of one employee
//! - `error`: validation errors shared by the above

pub mod conflict;
pub mod error;
pub mod expand;
pub mod model;

pub use conflict::{ShiftTimeLookup, find_conflict, has_conflict, rules_conflict};
pub use error::{ScheduleError, ScheduleResult};
pub use expand::{expand, expand_in, sort_occurrences};
pub use model::{
    AssignmentKind, AssignmentRule, DateWindow, Occurrence, Pattern, ShiftTime, ShiftType,
    WeekdaySet,
};
