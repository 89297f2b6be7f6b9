//! Behaviour-driven step definitions driving the rank CLI scenarios.

use super::steps::{CliWorld, world};
use super::*;
use firstcar_core::RankingResult;
use firstcar_scorer::RankingError;
use rstest_bdd_macros::{scenario, then, when};

#[when("I rank the \"{make}\" \"{model}\" from \"{year}\"")]
fn run_rank_command(#[from(world)] world: &CliWorld, make: String, model: String, year: String) {
    let extra = [
        format!("--{ARG_MAKE}"),
        make.trim_matches('"').to_owned(),
        format!("--{ARG_MODEL}"),
        model.trim_matches('"').to_owned(),
        format!("--{ARG_YEAR}"),
        year.trim_matches('"').to_owned(),
    ];
    let extra: Vec<&str> = extra.iter().map(String::as_str).collect();
    let invocation = world.command_line("rank", &extra);
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Rank(args) => {
            let mut buffer = world.stdout.borrow_mut();
            rank::run_rank_with(args, &mut *buffer)
        }
        Command::Shortlist(_) => panic!("expected rank command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the vehicle is matched for its exact year")]
fn matched_exactly(#[from(world)] world: &CliWorld) {
    let result: RankingResult = world.stdout_json();
    let matched = result.matched.as_ref().expect("vehicle should match");
    assert_eq!(matched.vehicle.id, "honda-fit-2019");
    assert_eq!(result.year_exact, Some(true));
    assert_eq!(result.total_compared, 5);
    assert!(result.rank.is_some_and(|rank| (1..=5).contains(&rank)));
}

#[then("the vehicle is unmatched but a leaderboard is printed")]
fn unmatched_with_leaderboard(#[from(world)] world: &CliWorld) {
    let result: RankingResult = world.stdout_json();
    assert!(result.matched.is_none());
    assert_eq!(result.rank, None);
    assert_eq!(result.leaderboard.len(), 5);
}

#[then("the command fails because the vehicle description is invalid")]
fn fails_invalid_descriptor(#[from(world)] world: &CliWorld) {
    world.with_error(|error| match error {
        CliError::Ranking(RankingError::Descriptor(_)) => {}
        other => panic!("expected a descriptor error, found {other:?}"),
    });
}

#[then("the vehicle is matched for a nearby year")]
fn matched_approximately(#[from(world)] world: &CliWorld) {
    let result: RankingResult = world.stdout_json();
    let matched = result.matched.as_ref().expect("vehicle should match");
    assert_eq!(matched.vehicle.id, "subaru-crosstrek-2023");
    assert_eq!(result.year_exact, Some(false));
    assert_eq!(result.requested_year, Some(2030));
}

macro_rules! register_rank_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/rank_command.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

register_rank_scenario!(rank_known_vehicle, "ranking a vehicle in the catalog");
register_rank_scenario!(rank_unknown_vehicle, "ranking a vehicle missing from the catalog");
register_rank_scenario!(rank_malformed_year, "rejecting a malformed year");
#[cfg(feature = "store-sqlite")]
register_rank_scenario!(rank_sqlite_catalog, "ranking from an SQLite catalog");
