//! Layered configuration shared by every subcommand.

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use tourscout_engine::EngineSettings;
use tourscout_oracle::artefact_is_file;

use crate::{
    ARG_ARTEFACTS_DIR, ARG_LOCATIONS, ARG_MAX_BLOCKING_CALLS, ARG_MAX_DISTANCE, ARG_MODEL,
    ARG_ORACLE, ARG_REQUEST, ARG_SCORING_CONCURRENCY, ARG_SCORING_TIMEOUT, ARG_TOP_N, CliError,
    ENV_REQUEST,
};

pub(crate) const DEFAULT_LOCATIONS_FILE: &str = "locations.json";
pub(crate) const DEFAULT_MODEL_FILE: &str = "enjoyment_model.json";

/// Which scoring oracle answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum OracleKind {
    /// Gradient boosted trees loaded from the model artefact.
    #[default]
    TreeEnsemble,
    /// Deterministic specialist-match heuristic; needs no artefact.
    SpecialistBoost,
}

/// CLI arguments shared by the `predict`, `recommend`, and `health`
/// subcommands.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load the location catalog and scoring model, then answer \
                 one JSON request. Paths and engine settings can come from \
                 CLI flags, configuration files, or TOURSCOUT_* environment \
                 variables.",
    about = "Answer a recommendation engine request"
)]
#[ortho_config(prefix = "TOURSCOUT")]
pub(crate) struct ServiceArgs {
    /// Path to a JSON file containing the request.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Directory containing the default artefact filenames.
    #[arg(long = ARG_ARTEFACTS_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) artefacts_dir: Option<Utf8PathBuf>,
    /// Override the location catalog path (`locations.json`, a `.csv`
    /// metadata export, or a SQLite database with a `.db` extension).
    #[arg(long = ARG_LOCATIONS, value_name = "path")]
    #[serde(default)]
    pub(crate) locations: Option<Utf8PathBuf>,
    /// Override the model artefact path (`enjoyment_model.json`).
    #[arg(long = ARG_MODEL, value_name = "path")]
    #[serde(default)]
    pub(crate) model: Option<Utf8PathBuf>,
    /// Scoring oracle to use.
    #[arg(long = ARG_ORACLE, value_enum)]
    #[serde(default)]
    pub(crate) oracle: Option<OracleKind>,
    /// Radius used when a request omits `max_distance_km`.
    #[arg(long = ARG_MAX_DISTANCE, value_name = "km")]
    #[serde(default)]
    pub(crate) max_distance_km: Option<f64>,
    /// Result count used when a request omits `top_n`.
    #[arg(long = ARG_TOP_N, value_name = "count")]
    #[serde(default)]
    pub(crate) top_n: Option<usize>,
    /// Upper bound on a single oracle call, in milliseconds.
    #[arg(long = ARG_SCORING_TIMEOUT, value_name = "ms")]
    #[serde(default)]
    pub(crate) scoring_timeout_ms: Option<u64>,
    /// Oracle calls in flight per request.
    #[arg(long = ARG_SCORING_CONCURRENCY, value_name = "count")]
    #[serde(default)]
    pub(crate) scoring_concurrency: Option<usize>,
    /// Oracle calls allowed on blocking threads across the process.
    #[arg(long = ARG_MAX_BLOCKING_CALLS, value_name = "count")]
    #[serde(default)]
    pub(crate) max_blocking_calls: Option<usize>,
}

impl ServiceArgs {
    pub(crate) fn into_config(self) -> Result<ServiceConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ServiceConfig::try_from(merged)
    }
}

/// Resolved service configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ServiceConfig {
    /// Path to the JSON request file, when the command takes one.
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Path to the location catalog.
    pub(crate) locations: Utf8PathBuf,
    /// Path to the model artefact.
    pub(crate) model: Utf8PathBuf,
    /// Scoring oracle to build.
    pub(crate) oracle: OracleKind,
    /// Validated engine settings.
    pub(crate) settings: EngineSettings,
}

impl ServiceConfig {
    /// The request path, which `predict` and `recommend` require.
    pub(crate) fn require_request(&self) -> Result<&Utf8Path, CliError> {
        self.request_path
            .as_deref()
            .ok_or(CliError::MissingArgument {
                field: ARG_REQUEST,
                env: ENV_REQUEST,
            })
    }

    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if let Some(request) = &self.request_path {
            Self::require_existing(request, ARG_REQUEST)?;
        }
        Self::require_existing(&self.locations, ARG_LOCATIONS)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match artefact_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<ServiceArgs> for ServiceConfig {
    type Error = CliError;

    fn try_from(args: ServiceArgs) -> Result<Self, Self::Error> {
        let artefacts_dir = args.artefacts_dir.unwrap_or_else(|| Utf8PathBuf::from("."));
        let locations = args
            .locations
            .unwrap_or_else(|| artefacts_dir.join(DEFAULT_LOCATIONS_FILE));
        let model = args
            .model
            .unwrap_or_else(|| artefacts_dir.join(DEFAULT_MODEL_FILE));

        let defaults = EngineSettings::default();
        let settings = EngineSettings {
            default_max_distance_km: args
                .max_distance_km
                .unwrap_or(defaults.default_max_distance_km),
            default_top_n: args.top_n.unwrap_or(defaults.default_top_n),
            scoring_timeout: args
                .scoring_timeout_ms
                .map_or(defaults.scoring_timeout, Duration::from_millis),
            scoring_concurrency: args
                .scoring_concurrency
                .unwrap_or(defaults.scoring_concurrency),
            max_blocking_calls: args
                .max_blocking_calls
                .unwrap_or(defaults.max_blocking_calls),
        };
        settings.validate()?;

        Ok(Self {
            request_path: args.request_path,
            locations,
            model,
            oracle: args.oracle.unwrap_or_default(),
            settings,
        })
    }
}

pub(crate) fn resolve_config(args: ServiceArgs) -> Result<ServiceConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ServiceConfig, CliError> {
    let merged = ServiceArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ServiceConfig::try_from(merged)
}
