//! Scheduling service layer.
//!
//! ## Module Organization
//!
//! - `auth`: caller resolution for requests and role-based authorization
//! - `error`: service error type wrapping every lower layer
//! - `schedule`: schedule queries and validated, conflict-checked rule writes
//! - `shift_types`: shift-type listing
//! - `store`: storage traits and the in-memory store

pub mod auth;
pub mod error;
pub mod schedule;
pub mod shift_types;
pub mod store;
