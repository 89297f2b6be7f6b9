//! `rank` command: place one make and model in the full ranking.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use firstcar_scorer::{RankingEngine, normalize};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ANSWERS, ARG_CATALOG, ARG_LEADERBOARD, ARG_MAKE, ARG_MODEL, ARG_OUTPUT, ARG_YEAR,
    CliError, ENV_RANK_ANSWERS, ENV_RANK_CATALOG, ENV_RANK_MAKE, ENV_RANK_MODEL,
    catalog::CatalogSource,
    input::{load_answers, require_existing, write_json},
};

/// CLI arguments for the `rank` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score the whole catalog for a set of quiz answers and \
                 report where one make and model lands, with a short \
                 leaderboard of the best matches. An unknown vehicle is \
                 reported as unmatched rather than as an error.",
    about = "Rank a specific make and model"
)]
#[ortho_config(prefix = "FIRSTCAR")]
pub(crate) struct RankArgs {
    /// Path to a JSON array of quiz answers.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) answers_path: Option<Utf8PathBuf>,
    /// Vehicle catalog: a `.json` export or an SQLite database.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Manufacturer to look up.
    #[arg(long = ARG_MAKE, value_name = "name")]
    #[serde(default)]
    pub(crate) make: Option<String>,
    /// Model to look up.
    #[arg(long = ARG_MODEL, value_name = "name")]
    #[serde(default)]
    pub(crate) model: Option<String>,
    /// Model year; the closest available year is used when absent.
    #[arg(long = ARG_YEAR, value_name = "year")]
    #[serde(default)]
    pub(crate) year: Option<String>,
    /// Leaderboard length (clamped to 1..=10).
    #[arg(long = ARG_LEADERBOARD, value_name = "count")]
    #[serde(default)]
    pub(crate) leaderboard: Option<usize>,
    /// Write JSON here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankArgs {
    pub(crate) fn into_config(self) -> Result<RankConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RankConfig::try_from(merged)
    }
}

/// Resolved `rank` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RankConfig {
    pub(crate) answers_path: Utf8PathBuf,
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) make: String,
    pub(crate) model: String,
    pub(crate) year: Option<String>,
    pub(crate) leaderboard: Option<usize>,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RankConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.answers_path, ARG_ANSWERS)?;
        require_existing(&self.catalog, ARG_CATALOG)
    }
}

impl TryFrom<RankArgs> for RankConfig {
    type Error = CliError;

    fn try_from(args: RankArgs) -> Result<Self, Self::Error> {
        let answers_path = args.answers_path.ok_or(CliError::MissingArgument {
            field: ARG_ANSWERS,
            env: ENV_RANK_ANSWERS,
        })?;
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_RANK_CATALOG,
        })?;
        let make = args.make.ok_or(CliError::MissingArgument {
            field: ARG_MAKE,
            env: ENV_RANK_MAKE,
        })?;
        let model = args.model.ok_or(CliError::MissingArgument {
            field: ARG_MODEL,
            env: ENV_RANK_MODEL,
        })?;
        Ok(Self {
            answers_path,
            catalog,
            make,
            model,
            year: args.year,
            leaderboard: args.leaderboard,
            output: args.output,
        })
    }
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_rank_with(args, &mut stdout)
}

pub(crate) fn run_rank_with(args: RankArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_rank(&config, writer)
}

pub(crate) fn execute_rank(config: &RankConfig, writer: &mut dyn Write) -> Result<(), CliError> {
    config.validate_sources()?;
    let normalized = normalize(&load_answers(&config.answers_path)?);
    let engine = RankingEngine::new(CatalogSource::open(&config.catalog)?);
    let result = engine.rank_described(
        &normalized.profile,
        &config.make,
        &config.model,
        config.year.as_deref(),
        config.leaderboard,
    )?;
    write_json(&result, config.output.as_ref(), writer)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RankConfig, CliError> {
    let merged = RankArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RankConfig::try_from(merged)
}
