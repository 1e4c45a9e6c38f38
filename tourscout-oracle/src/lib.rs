//! Scoring oracles for the Tourscout engine.
//!
//! The crate provides two [`ScoringOracle`](tourscout_core::ScoringOracle)
//! implementations:
//! - **[`TreeEnsembleOracle`]** evaluates a gradient boosted tree ensemble
//!   exported by XGBoost as JSON (`Booster.save_model("model.json")`). Only
//!   inference is supported; training happens offline.
//! - **[`SpecialistBoostOracle`]** is a deterministic baseline that rewards
//!   strong single-axis matches between a traveller and a location and
//!   penalises outdoor destinations in the rain.
//!
//! Artefacts are opened through `cap-std` using UTF-8 paths.
//!
//! # Examples
//!
//! ```no_run
//! use camino::Utf8Path;
//! use tourscout_oracle::TreeEnsembleOracle;
//!
//! let oracle = TreeEnsembleOracle::from_path(Utf8Path::new("models/enjoyment_model.json"))
//!     .expect("load model");
//! assert!(oracle.tree_count() > 0);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod artefact;
mod error;
mod specialist;
mod tree;

pub use artefact::{artefact_is_file, open_artefact};
pub use error::{ModelFormatError, ModelLoadError};
pub use specialist::{SpecialistBoostConfig, SpecialistBoostOracle};
pub use tree::TreeEnsembleOracle;
