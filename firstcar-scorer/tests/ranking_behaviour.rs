//! Behavioural tests for top-N retrieval and descriptor ranking.

use std::cell::RefCell;

use firstcar_core::{
    BudgetPreference, MemoryCatalog, PreferenceProfile, Priority, RankingResult, SafetyLevel,
    ScoredVehicle, Vehicle,
    test_support::{risky_pricey_vehicle, safe_budget_vehicle, sample_catalog},
};
use firstcar_scorer::RankingEngine;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct RankingWorld {
    catalog: RefCell<Vec<Vehicle>>,
    profile: RefCell<PreferenceProfile>,
    top: RefCell<Vec<ScoredVehicle>>,
    result: RefCell<Option<RankingResult>>,
}

impl RankingWorld {
    fn engine(&self) -> RankingEngine<MemoryCatalog> {
        let catalog = MemoryCatalog::new(self.catalog.borrow().clone()).expect("valid catalog");
        RankingEngine::new(catalog)
    }

    fn result(&self) -> RankingResult {
        self.result
            .borrow()
            .clone()
            .expect("a ranking should have been requested")
    }
}

#[fixture]
fn world() -> RankingWorld {
    RankingWorld::default()
}

#[given("a catalog with a safe budget car and a risky pricey car")]
fn given_scenario_catalog(world: &RankingWorld) {
    world
        .catalog
        .replace(vec![risky_pricey_vehicle(), safe_budget_vehicle()]);
}

#[given("the sample catalog")]
fn given_sample_catalog(world: &RankingWorld) {
    world.catalog.replace(sample_catalog());
}

#[given(
    "a profile capping the budget at {max} with priority {budget_priority} and demanding max safety with priority {safety_priority}"
)]
fn given_budget_and_safety(
    world: &RankingWorld,
    max: u32,
    budget_priority: u8,
    safety_priority: u8,
) {
    let profile = PreferenceProfile::new()
        .with_budget(BudgetPreference {
            min: None,
            max: Some(max),
            priority: Priority::new(budget_priority).expect("valid priority"),
        })
        .with_safety(
            SafetyLevel::Max,
            Priority::new(safety_priority).expect("valid priority"),
        );
    world.profile.replace(profile);
}

#[given("an empty profile")]
fn given_empty_profile(world: &RankingWorld) {
    world.profile.replace(PreferenceProfile::new());
}

#[when("I ask for the top {limit} vehicles")]
fn when_top(world: &RankingWorld, limit: usize) {
    let top = world
        .engine()
        .top_vehicles(&world.profile.borrow(), limit)
        .expect("memory catalog never fails");
    world.top.replace(top);
}

#[when("I rank a {make:word} {model:word} from {year}")]
fn when_rank(world: &RankingWorld, make: String, model: String, year: String) {
    let result = world
        .engine()
        .rank_described(
            &world.profile.borrow(),
            make.trim_matches('"'),
            model.trim_matches('"'),
            Some(year.trim_matches('"')),
            None,
        )
        .expect("descriptor is valid");
    world.result.replace(Some(result));
}

#[then("the safe budget car is ranked first with a positive score")]
fn then_safe_first(world: &RankingWorld) {
    let top = world.top.borrow();
    let first = top.first().expect("at least one vehicle");
    assert_eq!(first.vehicle.id, "vehicle-a");
    assert!(first.score > 0.0, "score was {}", first.score);
}

#[then("the risky pricey car is ranked last with a negative score")]
fn then_risky_last(world: &RankingWorld) {
    let top = world.top.borrow();
    let last = top.last().expect("at least one vehicle");
    assert_eq!(last.vehicle.id, "vehicle-b");
    assert!(last.score < 0.0, "score was {}", last.score);
}

#[then("the Corolla is matched approximately")]
fn then_corolla_approximate(world: &RankingWorld) {
    let result = world.result();
    let matched = result.matched.as_ref().expect("corolla should match");
    assert_eq!(matched.vehicle.model, "Corolla");
    assert_eq!(result.year_exact, Some(false));
    assert!(result.rank.is_some());
}

#[then("the available years are reported")]
fn then_available_years(world: &RankingWorld) {
    let result = world.result();
    assert_eq!(
        result.available_years.into_iter().collect::<Vec<_>>(),
        [2020, 2021, 2022]
    );
}

#[then("nothing is matched")]
fn then_nothing_matched(world: &RankingWorld) {
    let result = world.result();
    assert!(result.matched.is_none());
    assert_eq!(result.rank, None);
    assert_eq!(result.year_exact, None);
}

#[then("the leaderboard is drawn from the top of the ranking")]
fn then_leaderboard(world: &RankingWorld) {
    let result = world.result();
    let full = world
        .engine()
        .rank_all(&world.profile.borrow())
        .expect("memory catalog never fails");
    assert!(!result.leaderboard.is_empty());
    assert_eq!(result.total_compared, full.len());
    let expected: Vec<_> = full.into_iter().take(result.leaderboard.len()).collect();
    assert_eq!(result.leaderboard, expected);
}

#[then("the vehicles follow catalog order")]
fn then_catalog_order(world: &RankingWorld) {
    let ids: Vec<String> = world.top.borrow().iter().map(|s| s.vehicle.id.clone()).collect();
    let expected: Vec<String> = world
        .catalog
        .borrow()
        .iter()
        .take(ids.len())
        .map(|v| v.id.clone())
        .collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids, expected);
}

#[scenario(path = "tests/features/ranking.feature", index = 0)]
fn safe_car_outranks_risky_car(world: RankingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/ranking.feature", index = 1)]
fn missing_year_is_flagged(world: RankingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/ranking.feature", index = 2)]
fn unknown_vehicle_is_not_an_error(world: RankingWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/ranking.feature", index = 3)]
fn empty_profile_keeps_catalog_order(world: RankingWorld) {
    let _ = world;
}
