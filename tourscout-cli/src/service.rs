//! Builds the recommendation service from resolved configuration.

use std::{
    io::{BufReader, Read},
    sync::Arc,
};

use camino::Utf8Path;
use tourscout_core::{
    CatalogLoadError, ConfigurationError, FeatureVector, LinearScan, LocationCatalog,
    OracleError, ScoringOracle,
};
use tourscout_engine::RecommendationService;
use tourscout_oracle::{SpecialistBoostOracle, TreeEnsembleOracle, open_artefact};

use crate::{
    CliError,
    config::{OracleKind, ServiceConfig},
};

/// The service type every subcommand drives.
pub(crate) type Service = RecommendationService<Box<dyn ScoringOracle>>;

const SQLITE_EXTENSIONS: [&str; 3] = ["db", "sqlite", "sqlite3"];
const CSV_EXTENSIONS: [&str; 1] = ["csv"];

/// Builds a scoring oracle for the current invocation.
pub(crate) trait OracleBuilder {
    fn build(&self, config: &ServiceConfig) -> Result<Box<dyn ScoringOracle>, CliError>;
}

pub(crate) struct DefaultOracleBuilder;

impl OracleBuilder for DefaultOracleBuilder {
    fn build(&self, config: &ServiceConfig) -> Result<Box<dyn ScoringOracle>, CliError> {
        match config.oracle {
            OracleKind::TreeEnsemble => {
                let oracle = TreeEnsembleOracle::from_path(&config.model)
                    .map_err(ConfigurationError::from)?;
                Ok(Box::new(oracle))
            }
            OracleKind::SpecialistBoost => Ok(Box::new(SpecialistBoostOracle::new())),
        }
    }
}

/// Stands in for a model that failed to load so `health` can still report.
struct MissingModel;

impl ScoringOracle for MissingModel {
    fn score(&self, _features: &FeatureVector) -> Result<f64, OracleError> {
        Err(OracleError::NotReady)
    }

    fn is_ready(&self) -> bool {
        false
    }
}

/// Load the catalog, build the oracle, and assemble the service.
pub(crate) fn build_service(
    config: &ServiceConfig,
    builder: &dyn OracleBuilder,
) -> Result<Service, CliError> {
    let catalog = load_catalog(&config.locations)?;
    let oracle = builder.build(config)?;
    assemble(catalog, oracle, config)
}

/// Like [`build_service`], but a model failure degrades instead of aborting.
pub(crate) fn build_degradable_service(
    config: &ServiceConfig,
    builder: &dyn OracleBuilder,
) -> Result<Service, CliError> {
    let catalog = load_catalog(&config.locations)?;
    let oracle = match builder.build(config) {
        Ok(oracle) => oracle,
        Err(CliError::EngineConfiguration(err @ ConfigurationError::ModelUnavailable { .. })) => {
            tracing::warn!(error = %err, "scoring model unavailable; reporting degraded");
            Box::new(MissingModel)
        }
        Err(other) => return Err(other),
    };
    assemble(catalog, oracle, config)
}

fn assemble(
    catalog: LocationCatalog,
    oracle: Box<dyn ScoringOracle>,
    config: &ServiceConfig,
) -> Result<Service, CliError> {
    let service = RecommendationService::with_settings(
        Arc::new(catalog),
        Arc::new(oracle),
        LinearScan,
        config.settings.clone(),
    )?;
    Ok(service)
}

/// Load a catalog from JSON, or from SQLite or CSV when the extension says so.
pub(crate) fn load_catalog(path: &Utf8Path) -> Result<LocationCatalog, CliError> {
    let catalog = if has_extension(path, &SQLITE_EXTENSIONS) {
        load_sqlite_catalog(path)?
    } else if has_extension(path, &CSV_EXTENSIONS) {
        load_csv_catalog(path)?
    } else {
        let file = open_catalog(path)?;
        LocationCatalog::from_json_reader(BufReader::new(file))
            .map_err(|source| catalog_error(path, source))?
    };
    tracing::info!(path = %path, locations = catalog.len(), "location catalog loaded");
    Ok(catalog)
}

fn has_extension(path: &Utf8Path, extensions: &[&str]) -> bool {
    path.extension().is_some_and(|ext| {
        extensions
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(candidate))
    })
}

fn open_catalog(path: &Utf8Path) -> Result<impl Read, CliError> {
    open_artefact(path).map_err(|source| CliError::OpenCatalog {
        path: path.to_path_buf(),
        source,
    })
}

fn catalog_error(path: &Utf8Path, source: CatalogLoadError) -> CliError {
    CliError::LoadCatalog {
        path: path.to_path_buf(),
        source: Box::new(source),
    }
}

#[cfg(feature = "store-csv")]
fn load_csv_catalog(path: &Utf8Path) -> Result<LocationCatalog, CliError> {
    let file = open_catalog(path)?;
    LocationCatalog::from_csv_reader(BufReader::new(file))
        .map_err(|source| catalog_error(path, source))
}

#[cfg(not(feature = "store-csv"))]
const fn load_csv_catalog(_path: &Utf8Path) -> Result<LocationCatalog, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-csv",
        action: "loading a CSV location catalog",
    })
}

#[cfg(feature = "store-sqlite")]
fn load_sqlite_catalog(path: &Utf8Path) -> Result<LocationCatalog, CliError> {
    LocationCatalog::open_sqlite(path).map_err(|source| catalog_error(path, source))
}

#[cfg(not(feature = "store-sqlite"))]
const fn load_sqlite_catalog(_path: &Utf8Path) -> Result<LocationCatalog, CliError> {
    Err(CliError::MissingFeature {
        feature: "store-sqlite",
        action: "loading a SQLite location catalog",
    })
}
