//! Schedule queries and rule writes on behalf of an authenticated caller.
//!
//! ## Module Organization
//!
//! - `query`: window queries that expand, merge, sort and paginate occurrences
//! - `rules`: create, read, update and soft-delete of assignment rules

mod query;
mod rules;


pub use query::{ExpandedSchedulePage, ScheduleQuery, list_schedules};
pub use rules::{NewRule, RuleUpdate, create_rule, deactivate_rule, get_rule, update_rule};
