//! Error types emitted by the Tourscout CLI.
//!
//! Library errors are boxed or wrapped whole; `main` adds context through
//! `eyre` before reporting.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tourscout_core::{CatalogLoadError, ConfigurationError, EngineError};

/// Errors emitted by the Tourscout CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Command-line arguments were rejected by clap.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Merging CLI, file, and environment layers failed.
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// No layer supplied a required option.
    #[error("missing {field} (pass the {field} argument or set {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// The binary was built without a feature the input needs.
    #[error("{action} requires the `{feature}` feature to be enabled")]
    MissingFeature {
        /// Cargo feature name.
        feature: &'static str,
        /// What the caller tried to do.
        action: &'static str,
    },
    /// An input path names nothing on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument that named the path.
        field: &'static str,
        /// The missing path.
        path: Utf8PathBuf,
    },
    /// An input path names a directory or other non-file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument that named the path.
        field: &'static str,
        /// The offending path.
        path: Utf8PathBuf,
    },
    /// Inspecting an input path failed for a reason other than absence.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument that named the path.
        field: &'static str,
        /// The path being inspected.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The engine rejected its settings or could not load its model.
    #[error("engine configuration failed: {0}")]
    EngineConfiguration(#[from] ConfigurationError),
    /// Opening the location catalog failed.
    #[error("failed to open location catalog at {path:?}: {source}")]
    OpenCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// The location catalog could not be decoded or validated.
    #[error("failed to load location catalog from {path:?}: {source}")]
    LoadCatalog {
        /// Catalog path.
        path: Utf8PathBuf,
        /// Decoding or validation failure.
        #[source]
        source: Box<CatalogLoadError>,
    },
    /// Opening a request file failed.
    #[error("failed to open request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying failure.
        #[source]
        source: std::io::Error,
    },
    /// Request JSON could not be decoded.
    #[error("failed to parse request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// The engine rejected the request.
    #[error("request failed: {0}")]
    Engine(#[from] EngineError),
    /// Starting the async runtime failed.
    #[error("failed to start the async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serializing a response failed.
    #[error("failed to serialize response: {0}")]
    SerializeResponse(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
