//! Focused unit tests covering configuration defaults, layering, and source
//! validation.

use std::time::Duration;

use super::helpers::{Artefacts, write_utf8};
use super::*;
use crate::config::{
    DEFAULT_MODEL_FILE, OracleKind, ServiceConfig, config_from_layers_for_test,
};
use camino::Utf8PathBuf;
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;
use tourscout_core::ConfigurationError;
use tourscout_engine::EngineSettings;

#[rstest]
fn config_derives_default_artefact_paths() {
    let artefacts = Artefacts::new();
    let config =
        ServiceConfig::try_from(artefacts.args(None)).expect("config should build");

    assert_eq!(config.request_path, None);
    assert_eq!(config.locations, artefacts.locations());
    assert_eq!(config.model, artefacts.root().join(DEFAULT_MODEL_FILE));
    assert_eq!(config.oracle, OracleKind::TreeEnsemble);
    assert_eq!(config.settings, EngineSettings::default());
}

#[rstest]
fn config_defaults_to_current_directory() {
    let config = ServiceConfig::try_from(ServiceArgs::default()).expect("config should build");
    assert_eq!(config.locations, Utf8PathBuf::from("./locations.json"));
    assert_eq!(config.model, Utf8PathBuf::from("./enjoyment_model.json"));
}

#[rstest]
fn explicit_paths_override_the_artefacts_dir() {
    let artefacts = Artefacts::new();
    let locations = Utf8PathBuf::from("/srv/catalog/sites.db");
    let model = Utf8PathBuf::from("/srv/models/booster.json");
    let args = ServiceArgs {
        locations: Some(locations.clone()),
        model: Some(model.clone()),
        oracle: Some(OracleKind::SpecialistBoost),
        ..artefacts.args(None)
    };

    let config = ServiceConfig::try_from(args).expect("config should build");
    assert_eq!(config.locations, locations);
    assert_eq!(config.model, model);
    assert_eq!(config.oracle, OracleKind::SpecialistBoost);
}

#[rstest]
fn engine_settings_come_from_arguments() {
    let args = ServiceArgs {
        max_distance_km: Some(25.0),
        top_n: Some(3),
        scoring_timeout_ms: Some(120),
        scoring_concurrency: Some(2),
        max_blocking_calls: Some(4),
        ..ServiceArgs::default()
    };

    let config = ServiceConfig::try_from(args).expect("config should build");
    assert_eq!(config.settings.default_max_distance_km, 25.0);
    assert_eq!(config.settings.default_top_n, 3);
    assert_eq!(config.settings.scoring_timeout, Duration::from_millis(120));
    assert_eq!(config.settings.scoring_concurrency, 2);
    assert_eq!(config.settings.max_blocking_calls, 4);
}

#[rstest]
#[case::radius_too_small(ServiceArgs { max_distance_km: Some(0.5), ..ServiceArgs::default() }, "max_distance_km")]
#[case::radius_too_large(ServiceArgs { max_distance_km: Some(900.0), ..ServiceArgs::default() }, "max_distance_km")]
#[case::top_n_zero(ServiceArgs { top_n: Some(0), ..ServiceArgs::default() }, "top_n")]
#[case::top_n_too_large(ServiceArgs { top_n: Some(21), ..ServiceArgs::default() }, "top_n")]
#[case::zero_timeout(ServiceArgs { scoring_timeout_ms: Some(0), ..ServiceArgs::default() }, "scoring_timeout")]
#[case::zero_concurrency(ServiceArgs { scoring_concurrency: Some(0), ..ServiceArgs::default() }, "scoring_concurrency")]
#[case::zero_blocking_calls(ServiceArgs { max_blocking_calls: Some(0), ..ServiceArgs::default() }, "max_blocking_calls")]
fn out_of_range_settings_are_rejected(#[case] args: ServiceArgs, #[case] expected: &str) {
    let err = ServiceConfig::try_from(args).expect_err("settings should be rejected");
    match err {
        CliError::EngineConfiguration(ConfigurationError::InvalidSetting { name, .. }) => {
            assert_eq!(name, expected);
        }
        other => panic!("expected InvalidSetting, found {other:?}"),
    }
}

#[rstest]
fn require_request_reports_missing_argument() {
    let config = ServiceConfig::try_from(ServiceArgs::default()).expect("config should build");
    let err = config
        .require_request()
        .expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(env, ENV_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::missing_request(ARG_REQUEST, true)]
#[case::missing_locations(ARG_LOCATIONS, false)]
fn validate_sources_reports_missing_files(
    #[case] expected_field: &'static str,
    #[case] locations_present: bool,
) {
    let artefacts = if locations_present {
        Artefacts::with_sample_catalog()
    } else {
        Artefacts::new()
    };
    if !locations_present {
        artefacts.write_request("{}");
    }
    let config = ServiceConfig::try_from(artefacts.args(Some(artefacts.request())))
        .expect("config should build");

    let err = config.validate_sources().expect_err("expected failure");
    match err {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, expected_field),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn directory_catalog_path_is_rejected() {
    let artefacts = Artefacts::new();
    std::fs::create_dir(artefacts.locations().as_std_path()).expect("locations directory");
    let config = ServiceConfig::try_from(artefacts.args(None)).expect("config should build");

    let err = config
        .validate_sources()
        .expect_err("a directory is not a catalog");
    match err {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_LOCATIONS);
            assert_eq!(path, artefacts.locations());
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_skips_absent_request_for_health() {
    let artefacts = Artefacts::new();
    write_utf8(&artefacts.locations(), b"[]");
    let config = ServiceConfig::try_from(artefacts.args(None)).expect("config should build");
    config.validate_sources().expect("health needs no request");
}

#[rstest]
fn malformed_layer_is_a_configuration_error() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "request_path": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("a numeric request path cannot deserialize");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn layered_sources_resolve_by_precedence() {
    let artefacts = Artefacts::new();
    let root = artefacts.root();
    let env_request = root.join("env").join("request.json");
    let cli_dir = root.join("cli-artefacts");

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "artefacts_dir": root.join("file-artefacts").as_str(),
            "oracle": "specialist-boost",
            "top_n": 7,
        }),
        None,
    );
    composer.push_environment(json!({
        "request_path": env_request.as_str(),
        "artefacts_dir": root.join("env-artefacts").as_str(),
        "scoring_timeout_ms": 250,
    }));
    composer.push_cli(json!({
        "artefacts_dir": cli_dir.as_str(),
    }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.request_path, Some(env_request));
    assert_eq!(config.locations, cli_dir.join("locations.json"));
    assert_eq!(config.model, cli_dir.join(DEFAULT_MODEL_FILE));
    assert_eq!(config.oracle, OracleKind::SpecialistBoost);
    assert_eq!(config.settings.default_top_n, 7);
    assert_eq!(config.settings.scoring_timeout, Duration::from_millis(250));
}

#[rstest]
fn clap_parses_oracle_and_settings_flags() {
    let cli = Cli::try_parse_from([
        "tourscout",
        "recommend",
        "request.json",
        "--oracle",
        "specialist-boost",
        "--top-n",
        "3",
        "--scoring-timeout-ms",
        "75",
    ])
    .expect("arguments parse");
    let Command::Recommend(args) = cli.command else {
        panic!("expected recommend command");
    };
    assert_eq!(args.request_path, Some(Utf8PathBuf::from("request.json")));
    assert_eq!(args.oracle, Some(OracleKind::SpecialistBoost));
    assert_eq!(args.top_n, Some(3));
    assert_eq!(args.scoring_timeout_ms, Some(75));
}
