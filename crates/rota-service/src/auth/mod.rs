//! Caller resolution and authorization.
//!
//! ## Module Organization
//!
//! - `authenticate`: resolves the `CallerContext` of a request (single user, proxy)
//! - `authorize`: schedule visibility and management checks over the role table
//! - `depot`: storing and reading the resolved caller in a Salvo depot

pub mod authenticate;
pub mod authorize;
pub mod depot;

pub use authenticate::authenticate;
pub use authorize::{
    Visibility, can_manage_schedules, require_capability, require_manage, visible_employees,
};
pub use depot::{DepotCaller, depot_keys, get_caller_from_depot};
