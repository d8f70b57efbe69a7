//! HTTP surface of the rota scheduling service.
//!
//! ## Module Organization
//!
//! - `app`: routers and request handlers
//! - `config`: depot injection of the loaded settings
//! - `error`: HTTP error type and its status mapping
//! - `middleware`: request authentication
//! - `store_handler`: depot injection of the schedule store

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod store_handler;
