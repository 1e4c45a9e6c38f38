//! Error types raised while loading model artefacts.

use camino::{Utf8Path, Utf8PathBuf};
use thiserror::Error;
use tourscout_core::ConfigurationError;

/// The model document is well-formed JSON but not a usable ensemble.
#[derive(Debug, Error)]
pub enum ModelFormatError {
    /// The payload was not valid JSON or did not match the model layout.
    #[error("failed to decode model JSON: {0}")]
    Json(#[source] serde_json::Error),
    /// The booster is not a tree ensemble.
    #[error("unsupported booster `{name}`; only `gbtree` is supported")]
    UnsupportedBooster {
        /// Booster name found in the document.
        name: String,
    },
    /// The objective applies a non-identity link function.
    #[error("unsupported objective `{name}`; only identity-link regression objectives are supported")]
    UnsupportedObjective {
        /// Objective name found in the document.
        name: String,
    },
    /// `base_score` could not be parsed as a number.
    #[error("invalid base_score {raw:?}")]
    InvalidBaseScore {
        /// Raw value found in the document.
        raw: String,
    },
    /// The model was trained on a different feature layout.
    #[error("model features {found:?} do not match the expected feature order")]
    FeatureMismatch {
        /// Feature names or count found in the document.
        found: Vec<String>,
    },
    /// A tree's node arrays are inconsistent.
    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree {
        /// Position of the tree in the ensemble.
        tree: usize,
        /// Description of the inconsistency.
        reason: String,
    },
}

/// Loading a model artefact from disk failed.
#[derive(Debug, Error)]
pub enum ModelLoadError {
    /// The artefact could not be opened.
    #[error("failed to open model artefact at {path}")]
    Open {
        /// Requested artefact path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The artefact was opened but could not be used.
    #[error("model artefact at {path} is invalid")]
    Format {
        /// Requested artefact path.
        path: Utf8PathBuf,
        /// Description of the format problem.
        #[source]
        source: ModelFormatError,
    },
}

impl ModelLoadError {
    /// Path of the artefact that failed to load.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        match self {
            Self::Open { path, .. } | Self::Format { path, .. } => path,
        }
    }
}

impl From<ModelLoadError> for ConfigurationError {
    fn from(error: ModelLoadError) -> Self {
        Self::ModelUnavailable {
            path: error.path().to_string(),
            source: Box::new(error),
        }
    }
}
