//! `predict`, `recommend`, and `health` command implementations.

use std::io::{BufReader, Write};

use camino::Utf8Path;
use serde::{Serialize, de::DeserializeOwned};
use tourscout_engine::{PredictRequest, RecommendRequest};
use tourscout_oracle::open_artefact;

use crate::{
    CliError,
    config::{ServiceArgs, resolve_config},
    service::{DefaultOracleBuilder, OracleBuilder, build_degradable_service, build_service},
};

pub(crate) async fn run_predict(args: ServiceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_predict_with(args, &DefaultOracleBuilder, &mut stdout).await
}

pub(crate) async fn run_recommend(args: ServiceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_recommend_with(args, &DefaultOracleBuilder, &mut stdout).await
}

pub(crate) fn run_health(args: ServiceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_health_with(args, &DefaultOracleBuilder, &mut stdout)
}

pub(crate) async fn run_predict_with(
    args: ServiceArgs,
    builder: &dyn OracleBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let request: PredictRequest = load_request(config.require_request()?)?;
    let service = build_service(&config, builder)?;
    let response = service.predict(&request).await?;
    write_response(writer, &response)
}

pub(crate) async fn run_recommend_with(
    args: ServiceArgs,
    builder: &dyn OracleBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let request: RecommendRequest = load_request(config.require_request()?)?;
    let service = build_service(&config, builder)?;
    let response = service.recommend(&request).await?;
    tracing::debug!(
        returned = response.recommendations.len(),
        total = response.total_candidates,
        "recommendations ranked"
    );
    write_response(writer, &response)
}

pub(crate) fn run_health_with(
    args: ServiceArgs,
    builder: &dyn OracleBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_config(args)?;
    let service = build_degradable_service(&config, builder)?;
    write_response(writer, &service.health())
}

/// Loads a JSON-encoded request from disk.
pub(crate) fn load_request<T: DeserializeOwned>(path: &Utf8Path) -> Result<T, CliError> {
    let file = open_artefact(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_response<T: Serialize>(writer: &mut dyn Write, response: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(response).map_err(CliError::SerializeResponse)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
