//! Shared types used across all modules.
//!
//! Defines the API records, the projected report rows, and the run summary.
//! Other modules import from here rather than reaching into each other's
//! internals.

pub mod report;
pub mod user;

pub use report::{CompanySet, ReportRow, Summary, project};
pub use user::{RemoteCompany, RemoteUser};
