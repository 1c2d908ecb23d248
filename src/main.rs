//! users-report — export users from a JSON API to CSV.
//!
//! Entry point and error handling boundary. Configuration problems surface
//! through `anyhow`; the three pipeline failures print their own message.
//! Every failure exits with status 1.

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use cli::args::Cli;
use users_report::config::Config;
use users_report::env::Env;
use users_report::fetch::HttpUserSource;
use users_report::logging;
use users_report::output::terminal::TerminalReporter;
use users_report::pipeline::{self, PipelineError};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the pipeline failed and its message was printed.
async fn run() -> Result<bool> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let work_dir = std::env::current_dir().context("failed to determine working directory")?;
    let mut config = Config::load(cli.config.as_deref(), &work_dir, &Env::real())
        .context("failed to load configuration")?;
    cli.apply(&mut config);

    let reporter = TerminalReporter;
    let outcome = match HttpUserSource::new(&config.source) {
        Ok(source) => pipeline::run(&source, &config.output.path).await,
        Err(e) => Err(PipelineError::from(e)),
    };

    match outcome {
        Ok(summary) => {
            println!("{}", reporter.success(&config.output.path));
            println!("{}", reporter.summary(&summary));
            Ok(true)
        }
        Err(err) => {
            debug!(error = %err, "run aborted");
            eprintln!("{}", reporter.failure(&err));
            Ok(false)
        }
    }
}
