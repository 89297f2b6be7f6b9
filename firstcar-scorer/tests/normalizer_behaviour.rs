//! Behavioural tests for quiz answer normalization.

use std::cell::RefCell;

use firstcar_scorer::{AnswerIssue, NormalizedPreferences, RawAnswer, normalize};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Default)]
struct NormalizerWorld {
    answers: RefCell<Vec<RawAnswer>>,
    normalized: RefCell<Option<NormalizedPreferences>>,
}

impl NormalizerWorld {
    fn push(&self, answer: RawAnswer) {
        self.answers.borrow_mut().push(answer);
    }

    fn normalized(&self) -> NormalizedPreferences {
        self.normalized
            .borrow()
            .clone()
            .expect("answers should be normalized first")
    }
}

#[fixture]
fn world() -> NormalizerWorld {
    NormalizerWorld::default()
}

fn unquote(raw: &str) -> &str {
    raw.trim_matches('"')
}

#[given("no answers")]
fn given_no_answers(world: &NormalizerWorld) {
    world.answers.borrow_mut().clear();
}

#[given("a budget answer of \"{value}\" with priority {priority}")]
fn given_budget(world: &NormalizerWorld, value: String, priority: i64) {
    world.push(RawAnswer::single("budget", unquote(&value)).with_priority(priority));
}

#[given("a safety answer of \"{value}\"")]
fn given_safety(world: &NormalizerWorld, value: String) {
    world.push(RawAnswer::single("safety", unquote(&value)));
}

#[given("an extras answer selecting \"{first}\" and \"{second}\"")]
fn given_extras(world: &NormalizerWorld, first: String, second: String) {
    world.push(RawAnswer::multi(
        "extras",
        [unquote(&first), unquote(&second)],
    ));
}

#[given("an answer to an unknown question")]
fn given_unknown_question(world: &NormalizerWorld) {
    world.push(RawAnswer::single("favourite-radio-station", "jazz"));
}

#[when("I normalize the answers")]
fn when_normalize(world: &NormalizerWorld) {
    let normalized = normalize(&world.answers.borrow());
    world.normalized.replace(Some(normalized));
}

#[then("the profile has no axes")]
fn then_no_axes(world: &NormalizerWorld) {
    assert!(world.normalized().profile.is_empty());
}

#[then("the profile has exactly {count} axes")]
fn then_axis_count(world: &NormalizerWorld, count: usize) {
    assert_eq!(world.normalized().profile.axis_count(), count);
}

#[then("no issues are reported")]
fn then_no_issues(world: &NormalizerWorld) {
    let normalized = world.normalized();
    assert!(normalized.issues.is_empty());
    assert!(normalized.context.is_empty());
}

#[then("the budget ceiling is {max}")]
fn then_budget_ceiling(world: &NormalizerWorld, max: u32) {
    let budget = world.normalized().profile.budget.expect("budget axis");
    assert_eq!(budget.max, Some(max));
    assert_eq!(budget.priority.get(), 5);
}

#[then("the context summarizes the budget")]
fn then_budget_context(world: &NormalizerWorld) {
    let context = world.normalized().context;
    assert_eq!(context.budget.as_deref(), Some("$20,000 to $25,000"));
    assert!(context.extras.is_some());
}

#[then("an unrecognized value issue is reported")]
fn then_unrecognized_value(world: &NormalizerWorld) {
    assert!(matches!(
        world.normalized().issues.as_slice(),
        [AnswerIssue::UnrecognizedValue { .. }]
    ));
}

#[then("an unrecognized question issue is reported")]
fn then_unrecognized_question(world: &NormalizerWorld) {
    assert!(matches!(
        world.normalized().issues.as_slice(),
        [AnswerIssue::UnrecognizedQuestion { .. }]
    ));
}

#[scenario(path = "tests/features/normalizer.feature", index = 0)]
fn no_answers(world: NormalizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/normalizer.feature", index = 1)]
fn recognized_answers(world: NormalizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/normalizer.feature", index = 2)]
fn unrecognized_value(world: NormalizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/normalizer.feature", index = 3)]
fn unknown_question(world: NormalizerWorld) {
    let _ = world;
}
