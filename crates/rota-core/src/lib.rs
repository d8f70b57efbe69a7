//! Shared building blocks for the rota workspace: configuration, route
//! constants, identifiers, roles and the core error type.

pub mod caller;
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

pub use caller::{CallerContext, Capability, Role};
pub use types::{EmployeeId, RuleId, ShiftTypeId};
