//! Clap argument types.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use users_report::config::Config;

/// Fetch users from a JSON API and write them to a CSV report.
#[derive(Parser, Debug)]
#[command(
    name = "users-report",
    version = users_report::constants::VERSION,
    long_version = users_report::constants::LONG_VERSION,
)]
pub struct Cli {
    /// Endpoint returning a JSON array of users.
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,

    /// Path of the CSV report to write.
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Config file to use instead of ./.users-report.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(long, short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Apply flag overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        config.apply_overrides(self.url.clone(), self.output.clone());
    }
}
