//! Test helpers for laying out artefact directories and request files.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;
use tempfile::TempDir;
use tourscout_core::{
    ScoringOracle,
    test_support::{FixedOracle, sample_records},
};

use crate::{
    CliError,
    config::{DEFAULT_LOCATIONS_FILE, DEFAULT_MODEL_FILE, ServiceArgs, ServiceConfig},
    service::OracleBuilder,
};

pub(super) const HISTORY_LOVER: &str =
    r#"{"u_hist": 0.9, "u_adv": 0.1, "u_nat": 0.2, "u_rel": 0.3}"#;

/// Two stumps: `+2` for a keen historian (`-1` otherwise) and `-0.5` for an
/// outdoor site (`+0.5` otherwise), on top of a base score of 5.
pub(super) const TWO_TREE_MODEL: &str = r#"{
  "learner": {
    "learner_model_param": {"base_score": "5E0", "num_feature": "12"},
    "objective": {"name": "reg:squarederror"},
    "gradient_booster": {"name": "gbtree", "model": {"trees": [
      {"left_children": [1, -1, -1], "right_children": [2, -1, -1],
       "split_indices": [0, 0, 0], "split_conditions": [0.5, -1.0, 2.0],
       "default_left": [true, false, false]},
      {"left_children": [1, -1, -1], "right_children": [2, -1, -1],
       "split_indices": [8, 0, 0], "split_conditions": [0.5, 0.5, -0.5],
       "default_left": [false, false, false]}
    ]}}
  }
}"#;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write fixture file");
}

pub(super) fn write_json<T: Serialize>(path: &Utf8Path, value: &T) {
    let payload = serde_json::to_vec_pretty(value).expect("serialize fixture");
    write_utf8(path, &payload);
}

/// A temporary artefacts directory holding the sample catalog.
pub(super) struct Artefacts {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Artefacts {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn with_sample_catalog() -> Self {
        let artefacts = Self::new();
        write_json(&artefacts.locations(), &sample_records());
        artefacts
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn locations(&self) -> Utf8PathBuf {
        self.root.join(DEFAULT_LOCATIONS_FILE)
    }

    pub(super) fn model(&self) -> Utf8PathBuf {
        self.root.join(DEFAULT_MODEL_FILE)
    }

    pub(super) fn write_model(&self) {
        write_utf8(&self.model(), TWO_TREE_MODEL.as_bytes());
    }

    pub(super) fn request(&self) -> Utf8PathBuf {
        self.root.join("request.json")
    }

    pub(super) fn write_request(&self, body: &str) -> Utf8PathBuf {
        let path = self.request();
        write_utf8(&path, body.as_bytes());
        path
    }

    /// Arguments pointing at this directory with an optional request file.
    pub(super) fn args(&self, request: Option<Utf8PathBuf>) -> ServiceArgs {
        ServiceArgs {
            request_path: request,
            artefacts_dir: Some(self.root.clone()),
            ..ServiceArgs::default()
        }
    }
}

/// Builds an oracle returning the same raw score for every location.
#[derive(Debug, Clone, Copy)]
pub(super) struct FixedOracleBuilder(pub(super) f64);

impl OracleBuilder for FixedOracleBuilder {
    fn build(&self, _config: &ServiceConfig) -> Result<Box<dyn ScoringOracle>, CliError> {
        Ok(Box::new(FixedOracle(self.0)))
    }
}

pub(super) fn parse_output(stdout: &[u8]) -> serde_json::Value {
    serde_json::from_slice(stdout).expect("output should be JSON")
}
