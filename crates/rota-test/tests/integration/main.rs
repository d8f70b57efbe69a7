//! End-to-end tests of the HTTP API against an in-memory store.

mod helpers;
mod rules;
mod schedules;
