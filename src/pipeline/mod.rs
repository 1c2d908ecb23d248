//! The fetch → project → write → summarize run.
//!
//! Each stage returns its own error kind; the first failure ends the run
//! and nothing after it executes. In particular, no file is touched unless
//! the user list was fetched and decoded.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::fetch::{FetchError, UserSource};
use crate::models::{self, Summary};
use crate::output::csv::{self, PersistenceError};

/// The three ways a run can fail.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("API request failed: {0}")]
    Transport(String),

    #[error("response is not valid JSON: {0}")]
    Decode(String),

    #[error("could not write report: {0}")]
    Persistence(#[from] PersistenceError),
}

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Transport(detail) => PipelineError::Transport(detail),
            FetchError::Decode(detail) => PipelineError::Decode(detail),
        }
    }
}

/// Fetch users from `source`, write the report to `output`, and return the summary.
pub async fn run(source: &dyn UserSource, output: &Path) -> Result<Summary, PipelineError> {
    let users = source.fetch_users().await?;
    info!(count = users.len(), "fetched users");

    let rows = models::project(&users);
    csv::save_report(output, &rows)?;
    info!(path = %output.display(), rows = rows.len(), "report written");

    Ok(Summary::from_rows(&rows))
}
