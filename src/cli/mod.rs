//! CLI argument definitions.
//!
//! Uses clap derive macros. Every flag is optional; with none given the
//! tool fetches the default endpoint into `users_report.csv`.

pub mod args;
