//! App-wide constants.
//!
//! Centralises the tool name, the default endpoint and report path, config
//! paths, and environment variable names so a rename only touches this file.

/// Crate version as reported by Cargo.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version string shown by `--version`, including the target triple.
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("TARGET"), ")");

/// `User-Agent` header sent with the API request.
pub const USER_AGENT: &str = concat!("users-report/", env!("CARGO_PKG_VERSION"));

/// Endpoint returning the list of users.
pub const DEFAULT_SOURCE_URL: &str = "https://jsonplaceholder.typicode.com/users";

/// Report written to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "users_report.csv";

/// Column names of the report header, in order.
pub const REPORT_HEADER: [&str; 4] = ["Name", "Username", "Email", "Company"];

/// Local config filename (e.g. `.users-report.toml` in the working directory).
pub const CONFIG_FILENAME: &str = ".users-report.toml";

/// Directory name under `~/.config/` for the global config.
pub const CONFIG_DIR: &str = "users-report";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_URL: &str = "USERS_REPORT_URL";
pub const ENV_OUTPUT: &str = "USERS_REPORT_OUTPUT";
pub const ENV_TIMEOUT: &str = "USERS_REPORT_TIMEOUT";
