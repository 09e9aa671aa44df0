//! Command-line interface for the RouteWise sequencing engine.
//!
//! `routewise optimize <request.json>` reads a JSON document holding
//! `stops` and `coordinates`, runs the optimizer and prints the ordered
//! route as JSON on stdout. Options may come from flags, `ROUTEWISE_*`
//! environment variables or configuration files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod optimize;

pub use error::CliError;

use optimize::OptimizeArgs;

pub(crate) const ARG_OPTIMIZE_REQUEST: &str = "request";
pub(crate) const ARG_OPTIMIZE_ALLOW_PARTIAL: &str = "allow-partial";
pub(crate) const ARG_OPTIMIZE_LOG_LEVEL: &str = "log-level";
pub(crate) const ARG_OPTIMIZE_PRETTY: &str = "pretty";
pub(crate) const ENV_OPTIMIZE_REQUEST: &str = "ROUTEWISE_CMDS_OPTIMIZE_REQUEST_PATH";

/// Run the RouteWise CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// request cannot be read, or optimization fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Optimize(args) => optimize::run_optimize(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "routewise",
    about = "Sequence delivery stops into a closed nearest-neighbour tour",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Order the stops of a JSON request into a route.
    Optimize(OptimizeArgs),
}

#[cfg(test)]
mod tests;
