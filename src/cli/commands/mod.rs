//! Command implementations for the cost sheet processor CLI
//!
//! Each command is implemented in its own module; the pieces they share
//! (logging, configuration, the concurrent parse stage, reporting) live in
//! `shared`.

pub mod convert;
pub mod merge;
pub mod shared;

pub use shared::ProcessingStats;

use crate::cli::args::{Args, Commands};
use crate::{Error, Result};

/// Main command runner
///
/// Dispatches to the subcommand handler selected on the command line.
pub async fn run(args: Args) -> Result<ProcessingStats> {
    match args.command {
        Some(Commands::Convert(shared_args)) => convert::run_convert(shared_args).await,
        Some(Commands::Merge(shared_args)) => merge::run_merge(shared_args).await,
        None => Err(Error::configuration("No command given")),
    }
}
