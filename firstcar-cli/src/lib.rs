//! Command-line interface for ranking first-car shortlists.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod catalog;
mod error;
mod input;
mod rank;
mod shortlist;

pub use error::CliError;

use rank::RankArgs;
use shortlist::ShortlistArgs;

const ARG_ANSWERS: &str = "answers";
const ARG_CATALOG: &str = "catalog";
const ARG_LIMIT: &str = "limit";
const ARG_SNAPSHOT: &str = "snapshot";
const ARG_OUTPUT: &str = "output";
const ARG_MAKE: &str = "make";
const ARG_MODEL: &str = "model";
const ARG_YEAR: &str = "year";
const ARG_LEADERBOARD: &str = "leaderboard";
const ENV_SHORTLIST_ANSWERS: &str = "FIRSTCAR_CMDS_SHORTLIST_ANSWERS_PATH";
const ENV_SHORTLIST_CATALOG: &str = "FIRSTCAR_CMDS_SHORTLIST_CATALOG";
const ENV_RANK_ANSWERS: &str = "FIRSTCAR_CMDS_RANK_ANSWERS_PATH";
const ENV_RANK_CATALOG: &str = "FIRSTCAR_CMDS_RANK_CATALOG";
const ENV_RANK_MAKE: &str = "FIRSTCAR_CMDS_RANK_MAKE";
const ENV_RANK_MODEL: &str = "FIRSTCAR_CMDS_RANK_MODEL";

/// Run the CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] when arguments are invalid, inputs cannot be read, or
/// output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse()?;
    match cli.command {
        Command::Shortlist(args) => shortlist::run_shortlist(args),
        Command::Rank(args) => rank::run_rank(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "firstcar",
    about = "Rank a vehicle catalog against a parent's quiz answers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the best-matching vehicles for a set of answers.
    Shortlist(ShortlistArgs),
    /// Place one make and model in the full ranking.
    Rank(RankArgs),
}

#[cfg(test)]
mod tests;
