//! Command-line interface for the Tourscout recommendation engine.
//!
//! Each subcommand loads the location catalog and scoring oracle named by the
//! layered configuration, answers one JSON request, and prints the JSON
//! response to stdout.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod error;
mod logging;
mod service;

pub use error::CliError;
pub use logging::init_tracing;

use commands::{run_health, run_predict, run_recommend};
use config::ServiceArgs;

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_ARTEFACTS_DIR: &str = "artefacts-dir";
pub(crate) const ARG_LOCATIONS: &str = "locations";
pub(crate) const ARG_MODEL: &str = "model";
pub(crate) const ARG_ORACLE: &str = "oracle";
pub(crate) const ARG_MAX_DISTANCE: &str = "max-distance-km";
pub(crate) const ARG_TOP_N: &str = "top-n";
pub(crate) const ARG_SCORING_TIMEOUT: &str = "scoring-timeout-ms";
pub(crate) const ARG_SCORING_CONCURRENCY: &str = "scoring-concurrency";
pub(crate) const ARG_MAX_BLOCKING_CALLS: &str = "max-blocking-calls";
pub(crate) const ENV_REQUEST: &str = "TOURSCOUT_REQUEST_PATH";

/// Run the Tourscout CLI with the current process arguments and environment.
///
/// `--help` and `--version` print and exit the process the way clap does.
///
/// # Errors
/// Returns [`CliError`] when configuration, loading, or the request fails.
pub fn run() -> Result<(), CliError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.use_stderr() => return Err(CliError::ArgumentParsing(err)),
        Err(err) => err.exit(),
    };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    runtime.block_on(dispatch(cli.command))
}

async fn dispatch(command: Command) -> Result<(), CliError> {
    match command {
        Command::Predict(args) => run_predict(args).await,
        Command::Recommend(args) => run_recommend(args).await,
        Command::Health(args) => run_health(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "tourscout",
    about = "Personalised tourist location recommendations",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Score a single named location for a traveller.
    Predict(ServiceArgs),
    /// Rank nearby locations for a traveller.
    Recommend(ServiceArgs),
    /// Report whether the model and catalog are loaded.
    Health(ServiceArgs),
}

#[cfg(test)]
mod tests;
