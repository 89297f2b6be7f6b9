//! `shortlist` command: rank the catalog and print the best matches.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use firstcar_scorer::{DEFAULT_TOP_LIMIT, RankingEngine, normalize};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ANSWERS, ARG_CATALOG, ARG_LIMIT, ARG_OUTPUT, ARG_SNAPSHOT, CliError,
    ENV_SHORTLIST_ANSWERS, ENV_SHORTLIST_CATALOG,
    catalog::CatalogSource,
    input::{load_answers, require_existing, write_json},
};

/// CLI arguments for the `shortlist` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Normalize a JSON array of quiz answers, score every \
                 vehicle in the catalog and print the best matches as JSON. \
                 With --snapshot the output is the payload handed to a \
                 recommendation writer instead.",
    about = "Print the best-matching vehicles"
)]
#[ortho_config(prefix = "FIRSTCAR")]
pub(crate) struct ShortlistArgs {
    /// Path to a JSON array of quiz answers.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) answers_path: Option<Utf8PathBuf>,
    /// Vehicle catalog: a `.json` export or an SQLite database.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Number of vehicles to print.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Print the generator snapshot instead of the bare list.
    #[arg(long = ARG_SNAPSHOT)]
    #[serde(default)]
    pub(crate) snapshot: bool,
    /// Write JSON here instead of stdout.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ShortlistArgs {
    pub(crate) fn into_config(self) -> Result<ShortlistConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ShortlistConfig::try_from(merged)
    }
}

/// Resolved `shortlist` configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ShortlistConfig {
    pub(crate) answers_path: Utf8PathBuf,
    pub(crate) catalog: Utf8PathBuf,
    pub(crate) limit: usize,
    pub(crate) snapshot: bool,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl ShortlistConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.answers_path, ARG_ANSWERS)?;
        require_existing(&self.catalog, ARG_CATALOG)
    }
}

impl TryFrom<ShortlistArgs> for ShortlistConfig {
    type Error = CliError;

    fn try_from(args: ShortlistArgs) -> Result<Self, Self::Error> {
        let answers_path = args.answers_path.ok_or(CliError::MissingArgument {
            field: ARG_ANSWERS,
            env: ENV_SHORTLIST_ANSWERS,
        })?;
        let catalog = args.catalog.ok_or(CliError::MissingArgument {
            field: ARG_CATALOG,
            env: ENV_SHORTLIST_CATALOG,
        })?;
        Ok(Self {
            answers_path,
            catalog,
            limit: args.limit.unwrap_or(DEFAULT_TOP_LIMIT),
            snapshot: args.snapshot,
            output: args.output,
        })
    }
}

pub(crate) fn run_shortlist(args: ShortlistArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_shortlist_with(args, &mut stdout)
}

pub(crate) fn run_shortlist_with(
    args: ShortlistArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_shortlist(&config, writer)
}

pub(crate) fn execute_shortlist(
    config: &ShortlistConfig,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    config.validate_sources()?;
    let normalized = normalize(&load_answers(&config.answers_path)?);
    let engine = RankingEngine::new(CatalogSource::open(&config.catalog)?);
    if config.snapshot {
        let snapshot = engine.generator_snapshot(&normalized, config.limit)?;
        return write_json(&snapshot, config.output.as_ref(), writer);
    }
    let shortlist = engine.top_vehicles(&normalized.profile, config.limit)?;
    write_json(&shortlist, config.output.as_ref(), writer)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ShortlistConfig, CliError> {
    let merged = ShortlistArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ShortlistConfig::try_from(merged)
}
