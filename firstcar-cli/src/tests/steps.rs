//! Shared world and `Given` steps for the command scenarios.

use super::helpers::{Workspace, cautious_answers, write_utf8};
use super::*;
use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::given;
use std::cell::RefCell;

pub(super) struct CliWorld {
    pub(super) workspace: Workspace,
    pub(super) catalog: RefCell<Utf8PathBuf>,
    pub(super) include_answers: RefCell<bool>,
    pub(super) snapshot: RefCell<bool>,
    pub(super) stdout: RefCell<Vec<u8>>,
    pub(super) result: RefCell<Option<Result<(), CliError>>>,
}

impl CliWorld {
    fn new() -> Self {
        let workspace = Workspace::new();
        let catalog = workspace.json_catalog_path();
        Self {
            workspace,
            catalog: RefCell::new(catalog),
            include_answers: RefCell::new(true),
            snapshot: RefCell::new(false),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    /// `firstcar <command> [answers] --catalog <path>` followed by `extra`.
    pub(super) fn command_line(&self, command: &str, extra: &[&str]) -> Vec<String> {
        let mut argv = vec!["firstcar".to_owned(), command.to_owned()];
        if *self.include_answers.borrow() {
            argv.push(self.workspace.answers_path().into_string());
        }
        argv.extend([
            format!("--{ARG_CATALOG}"),
            self.catalog.borrow().as_str().to_owned(),
        ]);
        argv.extend(extra.iter().map(|arg| (*arg).to_owned()));
        argv
    }

    pub(super) fn stdout_json<T: serde::de::DeserializeOwned>(&self) -> T {
        self.assert_succeeded();
        serde_json::from_slice(&self.stdout.borrow()).expect("stdout should hold JSON")
    }

    fn assert_succeeded(&self) {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
    }

    /// Apply `check` to the recorded failure.
    pub(super) fn with_error(&self, check: impl FnOnce(&CliError)) {
        let borrowed = self.result.borrow();
        let error = borrowed
            .as_ref()
            .expect("result recorded")
            .as_ref()
            .expect_err("expected error");
        check(error);
    }
}

#[fixture]
pub(super) fn world() -> CliWorld {
    CliWorld::new()
}

#[given("the sample catalog is exported as JSON")]
fn sample_catalog_as_json(#[from(world)] world: &CliWorld) {
    world.workspace.write_json_catalog();
    world.catalog.replace(world.workspace.json_catalog_path());
}

#[cfg(feature = "store-sqlite")]
#[given("the sample catalog is stored in SQLite")]
fn sample_catalog_in_sqlite(#[from(world)] world: &CliWorld) {
    world.workspace.write_sqlite_catalog();
    world.catalog.replace(world.workspace.sqlite_catalog_path());
}

#[given("answers asking for a cheap and very safe car")]
fn cautious_answers_on_disk(#[from(world)] world: &CliWorld) {
    world.workspace.write_answers(&cautious_answers());
}

#[given("the answers file contains invalid JSON")]
fn invalid_answers_on_disk(#[from(world)] world: &CliWorld) {
    write_utf8(&world.workspace.answers_path(), b"[{ not valid json");
}

#[given("I omit the answers path")]
fn omit_answers_path(#[from(world)] world: &CliWorld) {
    *world.include_answers.borrow_mut() = false;
}
