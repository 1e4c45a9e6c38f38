//! Predictive scoring capability.
//!
//! The `ScoringOracle` trait maps a fixed-order feature vector to a raw
//! desirability value. The engine clamps raw values into the score range, so
//! oracles may return anything finite.

use std::sync::Arc;

use thiserror::Error;

use crate::{Interest, Location, UserProfile};

/// Number of features fed to an oracle.
pub const FEATURE_COUNT: usize = 12;

/// Feature names in the order oracles receive them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "u_hist",
    "u_adv",
    "u_nat",
    "u_rel",
    "l_hist",
    "l_adv",
    "l_nat",
    "l_rel",
    "l_outdoor",
    "l_lat",
    "l_lng",
    "c_raining",
];

/// Situational context for a scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoringContext {
    /// Whether it is currently raining at the destination.
    pub raining: bool,
}

impl ScoringContext {
    /// Context with the given weather flag.
    #[must_use]
    pub const fn new(raining: bool) -> Self {
        Self { raining }
    }
}

/// Oracle input built from a profile, a location, and the request context.
///
/// # Examples
/// ```
/// use tourscout_core::{FeatureVector, Interests, Location, ScoringContext, UserProfile};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let profile = UserProfile::new(0.9, 0.1, 0.2, 0.3)?;
/// let fort = Location::new("Galle Fort", Interests::new(0.9, 0.1, 0.2, 0.8)?, true, 6.0311, 80.2170)?;
/// let features = FeatureVector::new(&profile, &fort, ScoringContext::default());
/// assert_eq!(features.named("l_outdoor"), Some(1.0));
/// assert_eq!(features.named("c_raining"), Some(0.0));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Assemble features in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn new(profile: &UserProfile, location: &Location, context: ScoringContext) -> Self {
        let [u_hist, u_adv, u_nat, u_rel] = profile.interests().as_array();
        let [l_hist, l_adv, l_nat, l_rel] = location.interests().as_array();
        Self {
            values: [
                u_hist,
                u_adv,
                u_nat,
                u_rel,
                l_hist,
                l_adv,
                l_nat,
                l_rel,
                flag(location.is_outdoor()),
                location.latitude(),
                location.longitude(),
                flag(context.raining),
            ],
        }
    }

    /// Wrap raw values already in [`FEATURE_NAMES`] order.
    #[must_use]
    pub const fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Values in [`FEATURE_NAMES`] order.
    #[must_use]
    pub const fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Value at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Value of the feature called `name`.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|candidate| *candidate == name)
            .and_then(|index| self.get(index))
    }

    /// User weight for `interest`.
    #[must_use]
    pub const fn user(&self, interest: Interest) -> f64 {
        let [u_hist, u_adv, u_nat, u_rel, ..] = self.values;
        match interest {
            Interest::History => u_hist,
            Interest::Adventure => u_adv,
            Interest::Nature => u_nat,
            Interest::Relaxation => u_rel,
        }
    }

    /// Location rating for `interest`.
    #[must_use]
    pub const fn location(&self, interest: Interest) -> f64 {
        let [_, _, _, _, l_hist, l_adv, l_nat, l_rel, ..] = self.values;
        match interest {
            Interest::History => l_hist,
            Interest::Adventure => l_adv,
            Interest::Nature => l_nat,
            Interest::Relaxation => l_rel,
        }
    }

    /// Whether the location is outdoors.
    #[must_use]
    pub fn outdoor(&self) -> bool {
        self.named("l_outdoor").is_some_and(|value| value > 0.5)
    }

    /// Whether the request context reports rain.
    #[must_use]
    pub fn raining(&self) -> bool {
        self.named("c_raining").is_some_and(|value| value > 0.5)
    }
}

fn flag(value: bool) -> f64 {
    f64::from(u8::from(value))
}

/// Failure reported by an oracle for a single call.
#[derive(Debug, Error)]
pub enum OracleError {
    /// The oracle has no usable model.
    #[error("scoring oracle is not ready")]
    NotReady,
    /// The oracle rejected the input vector.
    #[error("invalid features: {0}")]
    InvalidInput(String),
    /// Any other inference failure.
    #[error("inference failed: {0}")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Score a feature vector.
///
/// Implementations must be thread-safe (`Send` + `Sync`): the engine calls a
/// single oracle from many requests at once and never serialises access.
///
/// # Examples
///
/// ```rust
/// use tourscout_core::{FeatureVector, OracleError, ScoringOracle};
///
/// struct Constant;
///
/// impl ScoringOracle for Constant {
///     fn score(&self, _features: &FeatureVector) -> Result<f64, OracleError> {
///         Ok(7.0)
///     }
/// }
///
/// let features = FeatureVector::from_array([0.0; 12]);
/// assert_eq!(Constant.score(&features).ok(), Some(7.0));
/// assert!(Constant.is_ready());
/// ```
pub trait ScoringOracle: Send + Sync {
    /// Return a raw, unclamped desirability value.
    ///
    /// # Errors
    /// Returns [`OracleError`] when inference cannot produce a value.
    fn score(&self, features: &FeatureVector) -> Result<f64, OracleError>;

    /// Whether a model is loaded and able to answer.
    fn is_ready(&self) -> bool {
        true
    }
}

impl<T: ScoringOracle + ?Sized> ScoringOracle for Box<T> {
    fn score(&self, features: &FeatureVector) -> Result<f64, OracleError> {
        (**self).score(features)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}

impl<T: ScoringOracle + ?Sized> ScoringOracle for Arc<T> {
    fn score(&self, features: &FeatureVector) -> Result<f64, OracleError> {
        (**self).score(features)
    }

    fn is_ready(&self) -> bool {
        (**self).is_ready()
    }
}
