//! Interest axes shared by user profiles and locations.
//!
//! Every location is rated against the same four axes a traveller can express
//! interest in. Both sides use the unit interval, so the product of a user
//! weight and a location rating is itself a unit-interval affinity.
//!
//! # Examples
//! ```
//! use tourscout_core::Interest;
//!
//! assert_eq!(Interest::History.as_str(), "hist");
//! assert_eq!(Interest::Relaxation.to_string(), "rel");
//! ```

use thiserror::Error;

/// A single interest axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Interest {
    /// Heritage sites, ruins, and museums.
    History,
    /// Hiking, surfing, rafting, and other active pursuits.
    Adventure,
    /// Parks, wildlife, and landscapes.
    Nature,
    /// Beaches, gardens, and slow-paced leisure.
    Relaxation,
}

impl Interest {
    /// All axes in feature-vector order.
    pub const ALL: [Self; 4] = [Self::History, Self::Adventure, Self::Nature, Self::Relaxation];

    /// Return the short key used in wire formats (`hist`, `adv`, `nat`, `rel`).
    ///
    /// # Examples
    /// ```
    /// use tourscout_core::Interest;
    ///
    /// assert_eq!(Interest::Nature.as_str(), "nat");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::History => "hist",
            Self::Adventure => "adv",
            Self::Nature => "nat",
            Self::Relaxation => "rel",
        }
    }

    /// Return the long, human-readable axis name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::History => "historical",
            Self::Adventure => "adventure",
            Self::Nature => "nature",
            Self::Relaxation => "relaxation",
        }
    }
}

impl std::fmt::Display for Interest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Interest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hist" | "history" | "historical" => Ok(Self::History),
            "adv" | "adventure" => Ok(Self::Adventure),
            "nat" | "nature" => Ok(Self::Nature),
            "rel" | "relax" | "relaxation" => Ok(Self::Relaxation),
            _ => Err(format!("unknown interest '{s}'")),
        }
    }
}

/// Errors raised when an interest weight falls outside `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum InterestError {
    /// The weight was NaN, infinite, or outside the unit interval.
    #[error("{interest} weight {value} must be within 0.0..=1.0")]
    OutOfRange {
        /// Axis carrying the invalid weight.
        interest: Interest,
        /// Rejected value.
        value: f64,
    },
}

/// Per-axis weights, each within `[0.0, 1.0]`.
///
/// # Examples
/// ```
/// use tourscout_core::{Interest, Interests};
///
/// # fn main() -> Result<(), tourscout_core::InterestError> {
/// let interests = Interests::new(0.9, 0.1, 0.2, 0.8)?;
/// assert_eq!(interests.get(Interest::History), 0.9);
/// assert!(Interests::new(1.2, 0.0, 0.0, 0.0).is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Interests {
    weights: [f64; 4],
}

impl Interests {
    /// Validate and construct a set of weights in `hist, adv, nat, rel` order.
    ///
    /// # Errors
    /// Returns [`InterestError::OutOfRange`] for the first weight that is not
    /// a finite value in the unit interval.
    pub fn new(hist: f64, adv: f64, nat: f64, rel: f64) -> Result<Self, InterestError> {
        Self::from_array([hist, adv, nat, rel])
    }

    /// Validate and construct weights from an array in axis order.
    ///
    /// # Errors
    /// Returns [`InterestError::OutOfRange`] when any weight is invalid.
    pub fn from_array(weights: [f64; 4]) -> Result<Self, InterestError> {
        for (interest, value) in Interest::ALL.into_iter().zip(weights) {
            check_unit(interest, value)?;
        }
        Ok(Self { weights })
    }

    /// Return the weight for `interest`.
    #[must_use]
    pub const fn get(&self, interest: Interest) -> f64 {
        let [hist, adv, nat, rel] = self.weights;
        match interest {
            Interest::History => hist,
            Interest::Adventure => adv,
            Interest::Nature => nat,
            Interest::Relaxation => rel,
        }
    }

    /// Replace one weight, validating the new value.
    ///
    /// # Errors
    /// Returns [`InterestError::OutOfRange`] when `value` is invalid.
    pub fn try_with(self, interest: Interest, value: f64) -> Result<Self, InterestError> {
        check_unit(interest, value)?;
        let [mut hist, mut adv, mut nat, mut rel] = self.weights;
        match interest {
            Interest::History => hist = value,
            Interest::Adventure => adv = value,
            Interest::Nature => nat = value,
            Interest::Relaxation => rel = value,
        }
        Ok(Self {
            weights: [hist, adv, nat, rel],
        })
    }

    /// Weights in axis order.
    #[must_use]
    pub const fn as_array(&self) -> [f64; 4] {
        self.weights
    }

    /// Iterate `(axis, weight)` pairs in axis order.
    pub fn iter(&self) -> impl Iterator<Item = (Interest, f64)> + '_ {
        Interest::ALL.into_iter().zip(self.weights)
    }
}

fn check_unit(interest: Interest, value: f64) -> Result<f64, InterestError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(InterestError::OutOfRange { interest, value })
    }
}
