//! Inference for XGBoost tree ensembles saved as JSON.
//!
//! Only the parts of the document needed for prediction are decoded:
//! `learner.learner_model_param.base_score`, the booster name, the objective
//! name, optional `feature_names`, and each tree's parallel node arrays.
//! Leaf values live in `split_conditions` at leaf positions, as XGBoost
//! writes them.

use std::io::{BufReader, Read};

use camino::Utf8Path;
use serde::Deserialize;
use tourscout_core::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, OracleError, ScoringOracle};

use crate::{ModelFormatError, ModelLoadError, open_artefact};

/// Objectives whose predictions are the raw margin.
const IDENTITY_OBJECTIVES: &[&str] = &[
    "reg:squarederror",
    "reg:linear",
    "reg:pseudohubererror",
    "reg:absoluteerror",
    "reg:quantileerror",
];

/// Marker XGBoost uses for "no child" in `left_children`/`right_children`.
const NO_CHILD: i64 = -1;

#[derive(Debug, Deserialize)]
struct ModelDocument {
    learner: LearnerDocument,
}

#[derive(Debug, Deserialize)]
struct LearnerDocument {
    #[serde(default)]
    feature_names: Vec<String>,
    learner_model_param: LearnerModelParam,
    gradient_booster: BoosterDocument,
    objective: ObjectiveDocument,
}

#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    base_score: String,
    #[serde(default)]
    num_feature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BoosterDocument {
    name: String,
    #[serde(default)]
    model: Option<ForestDocument>,
}

#[derive(Debug, Deserialize)]
struct ForestDocument {
    trees: Vec<TreeDocument>,
}

#[derive(Debug, Deserialize)]
struct ObjectiveDocument {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TreeDocument {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f64>,
    default_left: Vec<DefaultLeft>,
}

/// Older exports write `default_left` as integers, newer ones as booleans.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum DefaultLeft {
    Bool(bool),
    Int(i64),
}

impl DefaultLeft {
    const fn is_left(self) -> bool {
        match self {
            Self::Bool(flag) => flag,
            Self::Int(flag) => flag != 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Node {
    Leaf {
        value: f64,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        default_left: bool,
    },
}

#[derive(Debug, Clone, PartialEq)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn from_document(tree: usize, document: TreeDocument) -> Result<Self, ModelFormatError> {
        let malformed = |reason: String| ModelFormatError::MalformedTree { tree, reason };
        let count = document.left_children.len();
        if count == 0 {
            return Err(malformed("tree has no nodes".to_owned()));
        }
        let lengths = [
            document.right_children.len(),
            document.split_indices.len(),
            document.split_conditions.len(),
            document.default_left.len(),
        ];
        if lengths.iter().any(|len| *len != count) {
            return Err(malformed(format!(
                "node arrays have mismatched lengths ({count} vs {lengths:?})"
            )));
        }

        let nodes = document
            .left_children
            .iter()
            .zip(&document.right_children)
            .zip(&document.split_indices)
            .zip(&document.split_conditions)
            .zip(&document.default_left)
            .enumerate()
            .map(|(id, ((((left, right), feature), condition), default_left))| {
                build_node(id, count, *left, *right, *feature, *condition, *default_left)
                    .map_err(malformed)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { nodes })
    }

    /// Walk from the root to a leaf.
    ///
    /// Validation guarantees every child id exceeds its parent's, so the walk
    /// always terminates.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "XGBoost compares features as f32"
    )]
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Option<f64> {
        let mut current = 0;
        loop {
            match *self.nodes.get(current)? {
                Node::Leaf { value } => return Some(value),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let value = *features.get(feature)?;
                    current = if value.is_nan() {
                        if default_left { left } else { right }
                    } else if (value as f32) < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "XGBoost stores split thresholds as f32"
)]
fn build_node(
    id: usize,
    count: usize,
    left: i64,
    right: i64,
    feature: i64,
    condition: f64,
    default_left: DefaultLeft,
) -> Result<Node, String> {
    if left == NO_CHILD && right == NO_CHILD {
        if !condition.is_finite() {
            return Err(format!("leaf {id} has non-finite value {condition}"));
        }
        return Ok(Node::Leaf { value: condition });
    }
    let child = |raw: i64, side: &str| -> Result<usize, String> {
        usize::try_from(raw)
            .ok()
            .filter(|child| *child > id && *child < count)
            .ok_or_else(|| format!("node {id} has invalid {side} child {raw}"))
    };
    let feature_index = usize::try_from(feature)
        .ok()
        .filter(|index| *index < FEATURE_COUNT)
        .ok_or_else(|| format!("node {id} splits on unknown feature {feature}"))?;
    Ok(Node::Split {
        feature: feature_index,
        threshold: condition as f32,
        left: child(left, "left")?,
        right: child(right, "right")?,
        default_left: default_left.is_left(),
    })
}

/// A gradient boosted tree ensemble predicting `base_score + Σ leaves`.
///
/// The ensemble must have been trained on the twelve engine features in
/// [`FEATURE_NAMES`] order.
///
/// # Examples
/// ```
/// use tourscout_core::{FeatureVector, ScoringOracle};
/// use tourscout_oracle::TreeEnsembleOracle;
///
/// let model = r#"{"learner": {
///     "learner_model_param": {"base_score": "5E-1"},
///     "objective": {"name": "reg:squarederror"},
///     "gradient_booster": {"name": "gbtree", "model": {"trees": [{
///         "left_children": [1, -1, -1],
///         "right_children": [2, -1, -1],
///         "split_indices": [0, 0, 0],
///         "split_conditions": [0.5, 2.0, 8.0],
///         "default_left": [true, false, false]
///     }]}}
/// }}"#;
/// let oracle = TreeEnsembleOracle::from_json_str(model).expect("valid model");
/// let mut values = [0.0; 12];
/// values[0] = 0.9;
/// let score = oracle.score(&FeatureVector::from_array(values)).expect("prediction");
/// assert_eq!(score, 8.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TreeEnsembleOracle {
    base_score: f64,
    trees: Vec<Tree>,
}

impl TreeEnsembleOracle {
    /// Load an ensemble from a JSON artefact on disk.
    ///
    /// # Errors
    /// Returns [`ModelLoadError::Open`] when the file cannot be opened and
    /// [`ModelLoadError::Format`] when its contents are unusable.
    pub fn from_path(path: &Utf8Path) -> Result<Self, ModelLoadError> {
        let file = open_artefact(path).map_err(|source| ModelLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let oracle =
            Self::from_json_reader(BufReader::new(file)).map_err(|source| ModelLoadError::Format {
                path: path.to_path_buf(),
                source,
            })?;
        log::info!(
            "loaded tree ensemble with {} trees from {path}",
            oracle.tree_count()
        );
        Ok(oracle)
    }

    /// Decode an ensemble from a JSON reader.
    ///
    /// # Errors
    /// Returns [`ModelFormatError`] describing the first problem found.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, ModelFormatError> {
        let document: ModelDocument =
            serde_json::from_reader(reader).map_err(ModelFormatError::Json)?;
        Self::from_document(document)
    }

    /// Decode an ensemble from an in-memory JSON string.
    ///
    /// # Errors
    /// See [`TreeEnsembleOracle::from_json_reader`].
    pub fn from_json_str(payload: &str) -> Result<Self, ModelFormatError> {
        Self::from_json_reader(payload.as_bytes())
    }

    fn from_document(document: ModelDocument) -> Result<Self, ModelFormatError> {
        let learner = document.learner;
        if learner.gradient_booster.name != "gbtree" {
            return Err(ModelFormatError::UnsupportedBooster {
                name: learner.gradient_booster.name,
            });
        }
        if !IDENTITY_OBJECTIVES.contains(&learner.objective.name.as_str()) {
            return Err(ModelFormatError::UnsupportedObjective {
                name: learner.objective.name,
            });
        }
        check_feature_layout(&learner.feature_names, learner.learner_model_param.num_feature)?;
        let base_score = parse_base_score(&learner.learner_model_param.base_score)?;

        let forest = learner
            .gradient_booster
            .model
            .map_or_else(Vec::new, |model| model.trees);
        if forest.is_empty() {
            log::warn!("tree ensemble has no trees; every prediction equals base_score");
        }
        let trees = forest
            .into_iter()
            .enumerate()
            .map(|(index, tree)| Tree::from_document(index, tree))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { base_score, trees })
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Global bias added to every prediction.
    #[must_use]
    pub const fn base_score(&self) -> f64 {
        self.base_score
    }
}

fn check_feature_layout(names: &[String], count: Option<String>) -> Result<(), ModelFormatError> {
    if !names.is_empty() && names.iter().map(String::as_str).ne(FEATURE_NAMES) {
        return Err(ModelFormatError::FeatureMismatch {
            found: names.to_vec(),
        });
    }
    if let Some(raw) = count {
        let expected = FEATURE_COUNT.to_string();
        if raw.trim() != expected {
            return Err(ModelFormatError::FeatureMismatch { found: vec![raw] });
        }
    }
    Ok(())
}

/// Parse `base_score`, accepting both `"5E-1"` and the bracketed `"[5E-1]"`
/// form written by newer XGBoost releases.
fn parse_base_score(raw: &str) -> Result<f64, ModelFormatError> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']').trim();
    inner
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ModelFormatError::InvalidBaseScore {
            raw: raw.to_owned(),
        })
}

impl ScoringOracle for TreeEnsembleOracle {
    #[expect(
        clippy::float_arithmetic,
        reason = "ensemble prediction sums leaf values"
    )]
    fn score(&self, features: &FeatureVector) -> Result<f64, OracleError> {
        let values = features.as_array();
        self.trees.iter().try_fold(self.base_score, |total, tree| {
            tree.predict(values)
                .map(|leaf| total + leaf)
                .ok_or_else(|| OracleError::InvalidInput("tree walk left the node table".to_owned()))
        })
    }
}
