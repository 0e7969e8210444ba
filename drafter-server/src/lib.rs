//! HTTP service and command-line entry point for Wild Drafter.
//!
//! The `serve` subcommand resolves layered configuration, opens the catalog
//! store named by the database URL, seeds it when empty, and serves the
//! recommendation and administration routes.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod config;
mod error;
mod proposal;
mod routes;
mod serve;

pub use config::{ServeArgs, WriteMode};
pub use error::CliError;
pub use proposal::{ProposalError, ProposalRecorder};
pub use routes::{
    ApiError, AppState, QuestionView, health, list_champions, questions, recommend, router,
    save_champions,
};

/// Run the Wild Drafter CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments or configuration are invalid, the
/// store cannot be opened or seeded, or the server fails.
pub async fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Serve(args) => serve::run_serve(args).await,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "wild-drafter",
    about = "Champion recommendations for jungle drafting",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve recommendations and the catalog API over HTTP.
    Serve(ServeArgs),
}

#[cfg(test)]
mod tests;
