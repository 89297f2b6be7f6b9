//! Focused unit tests covering CLI configuration, input loading and output.

use super::helpers::{Workspace, cautious_answers, write_utf8};
use super::*;
use crate::input::load_answers;
use crate::rank::{RankArgs, RankConfig, execute_rank};
use crate::shortlist::{ShortlistArgs, ShortlistConfig, execute_shortlist};
use camino::Utf8PathBuf;
use firstcar_core::{RankingResult, ScoredVehicle};
use firstcar_scorer::{DEFAULT_TOP_LIMIT, RankingError};
use rstest::{fixture, rstest};

#[fixture]
fn workspace() -> Workspace {
    let workspace = Workspace::new();
    workspace.write_answers(&cautious_answers());
    workspace.write_json_catalog();
    workspace
}

fn shortlist_config(workspace: &Workspace) -> ShortlistConfig {
    ShortlistConfig {
        answers_path: workspace.answers_path(),
        catalog: workspace.json_catalog_path(),
        limit: DEFAULT_TOP_LIMIT,
        snapshot: false,
        output: None,
    }
}

fn rank_config(workspace: &Workspace, make: &str, model: &str) -> RankConfig {
    RankConfig {
        answers_path: workspace.answers_path(),
        catalog: workspace.json_catalog_path(),
        make: make.to_owned(),
        model: model.to_owned(),
        year: None,
        leaderboard: None,
        output: None,
    }
}

#[rstest]
#[case(None, Some("catalog.json"), ARG_ANSWERS, ENV_SHORTLIST_ANSWERS)]
#[case(Some("answers.json"), None, ARG_CATALOG, ENV_SHORTLIST_CATALOG)]
fn shortlist_without_required_fields_errors(
    #[case] answers: Option<&str>,
    #[case] catalog: Option<&str>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = ShortlistArgs {
        answers_path: answers.map(Utf8PathBuf::from),
        catalog: catalog.map(Utf8PathBuf::from),
        ..ShortlistArgs::default()
    };
    match ShortlistConfig::try_from(args).expect_err("missing field should error") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case(None, Some("Civic"), ARG_MAKE, ENV_RANK_MAKE)]
#[case(Some("Honda"), None, ARG_MODEL, ENV_RANK_MODEL)]
fn rank_without_make_or_model_errors(
    #[case] make: Option<&str>,
    #[case] model: Option<&str>,
    #[case] expected_field: &'static str,
    #[case] expected_env: &'static str,
) {
    let args = RankArgs {
        answers_path: Some(Utf8PathBuf::from("answers.json")),
        catalog: Some(Utf8PathBuf::from("catalog.db")),
        make: make.map(str::to_owned),
        model: model.map(str::to_owned),
        ..RankArgs::default()
    };
    match RankConfig::try_from(args).expect_err("missing field should error") {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, expected_field);
            assert_eq!(env, expected_env);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn shortlist_limit_defaults_to_engine_shortlist_length() {
    let args = ShortlistArgs {
        answers_path: Some(Utf8PathBuf::from("answers.json")),
        catalog: Some(Utf8PathBuf::from("catalog.json")),
        ..ShortlistArgs::default()
    };
    let config = ShortlistConfig::try_from(args).expect("config should build");
    assert_eq!(config.limit, DEFAULT_TOP_LIMIT);
    assert!(!config.snapshot);
    assert_eq!(config.output, None);
}

#[rstest]
fn validate_sources_reports_missing_catalog(workspace: Workspace) {
    let config = ShortlistConfig {
        catalog: workspace.root.join("absent.json"),
        ..shortlist_config(&workspace)
    };
    match config.validate_sources().expect_err("catalog is missing") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_CATALOG),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_rejects_directories(workspace: Workspace) {
    let answers_dir = workspace.root.join("answers.d");
    std::fs::create_dir(&answers_dir).expect("answers directory");
    let config = RankConfig {
        answers_path: answers_dir.clone(),
        ..rank_config(&workspace, "Honda", "Fit")
    };
    match config.validate_sources().expect_err("directory is not a file") {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_ANSWERS);
            assert_eq!(path, answers_dir);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_answers_decodes_camel_case_json(workspace: Workspace) {
    write_utf8(
        &workspace.answers_path(),
        br#"[{"questionId":"extras","type":"multi","selectedValues":["tech-forward","sporty-look"]}]"#,
    );
    let answers = load_answers(&workspace.answers_path()).expect("answers decode");
    let [answer] = answers.as_slice() else {
        panic!("expected one answer, found {answers:?}");
    };
    assert_eq!(answer.question_id, "extras");
    assert_eq!(answer.selected_values, ["tech-forward", "sporty-look"]);
}

#[rstest]
fn load_answers_rejects_invalid_json(workspace: Workspace) {
    write_utf8(&workspace.answers_path(), b"{ not valid json");
    match load_answers(&workspace.answers_path()).expect_err("invalid json") {
        CliError::ParseAnswers { path, .. } => assert_eq!(path, workspace.answers_path()),
        other => panic!("expected ParseAnswers, found {other:?}"),
    }
}

#[rstest]
fn invalid_json_catalog_is_reported_with_its_path(workspace: Workspace) {
    write_utf8(&workspace.json_catalog_path(), b"[{\"id\": 7}]");
    let mut stdout = Vec::new();
    match execute_shortlist(&shortlist_config(&workspace), &mut stdout).expect_err("bad catalog") {
        CliError::LoadCatalog { path, .. } => assert_eq!(path, workspace.json_catalog_path()),
        other => panic!("expected LoadCatalog, found {other:?}"),
    }
    assert!(stdout.is_empty());
}

#[rstest]
fn shortlist_prints_sorted_vehicles(workspace: Workspace) {
    let mut stdout = Vec::new();
    execute_shortlist(&shortlist_config(&workspace), &mut stdout).expect("shortlist");
    let printed: Vec<ScoredVehicle> = serde_json::from_slice(&stdout).expect("JSON output");
    assert_eq!(printed.len(), DEFAULT_TOP_LIMIT);
    assert!(printed.windows(2).all(|pair| match pair {
        [a, b] => a.score >= b.score,
        _ => true,
    }));
}

#[rstest]
fn shortlist_writes_output_file_instead_of_stdout(workspace: Workspace) {
    let output = workspace.root.join("out/shortlist.json");
    let config = ShortlistConfig {
        limit: 2,
        output: Some(output.clone()),
        ..shortlist_config(&workspace)
    };
    let mut stdout = Vec::new();
    execute_shortlist(&config, &mut stdout).expect("shortlist");
    assert!(stdout.is_empty());
    let written = firstcar_fs::read_utf8_file(&output).expect("output file");
    let printed: Vec<ScoredVehicle> = serde_json::from_str(&written).expect("JSON output");
    assert_eq!(printed.len(), 2);
}

#[rstest]
fn rank_reports_unknown_vehicle_without_failing(workspace: Workspace) {
    let mut stdout = Vec::new();
    execute_rank(&rank_config(&workspace, "Lada", "Niva"), &mut stdout).expect("rank");
    let result: RankingResult = serde_json::from_slice(&stdout).expect("JSON output");
    assert!(!result.is_found());
    assert_eq!(result.total_compared, 5);
}

#[rstest]
fn rank_rejects_out_of_range_year(workspace: Workspace) {
    let config = RankConfig {
        year: Some("1850".to_owned()),
        ..rank_config(&workspace, "Honda", "Fit")
    };
    let mut stdout = Vec::new();
    match execute_rank(&config, &mut stdout).expect_err("bad year") {
        CliError::Ranking(RankingError::Descriptor(_)) => {}
        other => panic!("expected a descriptor error, found {other:?}"),
    }
}

#[cfg(feature = "store-sqlite")]
#[rstest]
fn non_json_catalogs_are_read_from_sqlite(workspace: Workspace) {
    workspace.write_sqlite_catalog();
    let config = RankConfig {
        catalog: workspace.sqlite_catalog_path(),
        year: Some("2023".to_owned()),
        ..rank_config(&workspace, "subaru", "crosstrek")
    };
    let mut stdout = Vec::new();
    execute_rank(&config, &mut stdout).expect("rank");
    let result: RankingResult = serde_json::from_slice(&stdout).expect("JSON output");
    let matched = result.matched.expect("crosstrek should match");
    assert_eq!(matched.vehicle.id, "subaru-crosstrek-2023");
    assert_eq!(result.year_exact, Some(true));
}

#[cfg(feature = "store-sqlite")]
#[rstest]
fn corrupt_sqlite_catalog_fails_to_open(workspace: Workspace) {
    write_utf8(&workspace.sqlite_catalog_path(), b"not a database");
    let config = ShortlistConfig {
        catalog: workspace.sqlite_catalog_path(),
        ..shortlist_config(&workspace)
    };
    let mut stdout = Vec::new();
    match execute_shortlist(&config, &mut stdout).expect_err("corrupt database") {
        CliError::OpenCatalog(_) => {}
        other => panic!("expected OpenCatalog, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "limit": "plenty" }));

    match shortlist::config_from_layers_for_test(composer.layers()) {
        Err(CliError::Configuration(_)) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "catalog": "from-file.db",
            "model": "Fit",
            "leaderboard": 3,
        }),
        None,
    );
    composer.push_environment(json!({
        "answers_path": "from-env.json",
        "make": "Toyota",
        "leaderboard": 7,
    }));
    composer.push_cli(json!({ "make": "Honda" }));

    let config = rank::config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.answers_path, Utf8PathBuf::from("from-env.json"));
    assert_eq!(config.catalog, Utf8PathBuf::from("from-file.db"));
    assert_eq!(config.make, "Honda");
    assert_eq!(config.model, "Fit");
    assert_eq!(config.leaderboard, Some(7));
}
