//! Behaviour-driven step definitions driving the CLI command scenarios.

use super::helpers::{Artefacts, HISTORY_LOVER, parse_output, write_json};
use super::*;
use crate::{
    commands::{run_health_with, run_predict_with, run_recommend_with},
    service::DefaultOracleBuilder,
};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::{cell::RefCell, future::Future};
use tourscout_core::test_support::sample_records;

struct CommandWorld {
    artefacts: Artefacts,
    include_request: RefCell<bool>,
    cli_args: RefCell<Vec<String>>,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl CommandWorld {
    fn new() -> Self {
        Self {
            artefacts: Artefacts::new(),
            include_request: RefCell::new(true),
            cli_args: RefCell::new(Vec::new()),
            stdout: RefCell::new(Vec::new()),
            result: RefCell::new(None),
        }
    }

    fn build_command_line(&self, command: &str) -> Vec<String> {
        let mut argv = vec!["tourscout".to_owned(), command.to_owned()];
        if *self.include_request.borrow() {
            argv.push(self.artefacts.request().into_string());
        }
        argv.extend([
            format!("--{ARG_ARTEFACTS_DIR}"),
            self.artefacts.root().as_str().to_owned(),
        ]);
        argv.extend(self.cli_args.borrow().iter().cloned());
        argv
    }

    fn error(&self) -> std::cell::Ref<'_, CliError> {
        std::cell::Ref::map(self.result.borrow(), |result| {
            result
                .as_ref()
                .expect("result recorded")
                .as_ref()
                .expect_err("expected error")
        })
    }

    fn output(&self) -> serde_json::Value {
        let borrowed = self.result.borrow();
        let result = borrowed.as_ref().expect("result recorded");
        if let Err(err) = result {
            panic!("expected success, found {err:?}");
        }
        parse_output(&self.stdout.borrow())
    }
}

#[fixture]
fn world() -> CommandWorld {
    CommandWorld::new()
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime")
        .block_on(future)
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

#[given("the sample catalog is in the artefacts directory")]
fn sample_catalog_on_disk(#[from(world)] world: &CommandWorld) {
    write_json(&world.artefacts.locations(), &sample_records());
}

#[given("the enjoyment model is in the artefacts directory")]
fn model_on_disk(#[from(world)] world: &CommandWorld) {
    world.artefacts.write_model();
}

#[given("a recommend request around {name} exists on disk")]
fn recommend_request_on_disk(#[from(world)] world: &CommandWorld, name: String) {
    world.artefacts.write_request(&format!(
        r#"{{"user_profile": {HISTORY_LOVER}, "target_location": "{}", "max_distance_km": 10}}"#,
        unquote(&name)
    ));
}

#[given("a predict request for {name} exists on disk")]
fn predict_request_on_disk(#[from(world)] world: &CommandWorld, name: String) {
    world.artefacts.write_request(&format!(
        r#"{{"user_profile": {HISTORY_LOVER}, "location_name": "{}"}}"#,
        unquote(&name)
    ));
}

#[given("the request contains invalid JSON")]
fn request_contains_invalid_json(#[from(world)] world: &CommandWorld) {
    world.artefacts.write_request("{ not valid json");
}

#[given("I choose the specialist-boost oracle")]
fn choose_specialist_oracle(#[from(world)] world: &CommandWorld) {
    world
        .cli_args
        .borrow_mut()
        .extend([format!("--{ARG_ORACLE}"), "specialist-boost".to_owned()]);
}

#[given("I omit the request path")]
fn omit_request_path(#[from(world)] world: &CommandWorld) {
    *world.include_request.borrow_mut() = false;
}

#[when("I run the {command} command")]
fn run_command(#[from(world)] world: &CommandWorld, command: String) {
    let invocation = world.build_command_line(&command);
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| {
        let mut buffer = world.stdout.borrow_mut();
        match cli.command {
            Command::Predict(args) => block_on(run_predict_with(
                args,
                &DefaultOracleBuilder,
                &mut *buffer,
            )),
            Command::Recommend(args) => block_on(run_recommend_with(
                args,
                &DefaultOracleBuilder,
                &mut *buffer,
            )),
            Command::Health(args) => run_health_with(args, &DefaultOracleBuilder, &mut *buffer),
        }
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds with {count} candidates")]
fn command_succeeds_with_candidates(#[from(world)] world: &CommandWorld, count: u64) {
    assert_eq!(world.output()["total_candidates"], count);
}

#[then("the first recommendation is {name}")]
fn first_recommendation_is(#[from(world)] world: &CommandWorld, name: String) {
    assert_eq!(
        world.output()["recommendations"][0]["location_name"],
        unquote(&name)
    );
}

#[then("the command succeeds with a predicted score of {score}")]
fn command_succeeds_with_score(#[from(world)] world: &CommandWorld, score: f64) {
    assert_eq!(world.output()["predicted_score"], score);
}

#[then("the command fails because the request path is missing")]
fn command_fails_missing_request_path(#[from(world)] world: &CommandWorld) {
    match &*world.error() {
        CliError::MissingArgument { field, .. } => assert_eq!(*field, ARG_REQUEST),
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[then("the command fails because the request JSON is invalid")]
fn command_fails_invalid_json(#[from(world)] world: &CommandWorld) {
    match &*world.error() {
        CliError::ParseRequest { path, .. } => assert_eq!(*path, world.artefacts.request()),
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#[then("the command fails because the locations file is missing")]
fn command_fails_missing_locations(#[from(world)] world: &CommandWorld) {
    match &*world.error() {
        CliError::MissingSourceFile { field, .. } => assert_eq!(*field, ARG_LOCATIONS),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[then("the health status is {status}")]
fn health_status_is(#[from(world)] world: &CommandWorld, status: String) {
    assert_eq!(world.output()["status"], unquote(&status));
}

macro_rules! register_command_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CommandWorld) {
            let _ = world;
        }
    };
}

register_command_scenario!(recommend_from_file, "recommending landmarks from a request file");
register_command_scenario!(predict_with_tree_model, "predicting with the tree ensemble model");
register_command_scenario!(predict_missing_request, "rejecting missing request paths");
register_command_scenario!(recommend_invalid_json, "rejecting invalid JSON input");
register_command_scenario!(recommend_missing_catalog, "rejecting a missing location catalog");
register_command_scenario!(health_without_model, "reporting degraded health without a model");
