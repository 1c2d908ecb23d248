//! users-report — export users from a JSON API to CSV (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod fetch;
pub mod logging;
pub mod models;
pub mod output;
pub mod pipeline;
