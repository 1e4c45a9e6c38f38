//! Bounded desirability scores.

use crate::RecommendationLevel;

/// Lowest score a recommendation can carry.
pub const MIN_SCORE: f64 = 1.0;

/// Highest score a recommendation can carry.
pub const MAX_SCORE: f64 = 10.0;

/// A desirability score clamped into `[MIN_SCORE, MAX_SCORE]`.
///
/// # Examples
/// ```
/// use tourscout_core::{RecommendationLevel, Score};
///
/// let score = Score::from_raw(12.5).expect("finite or infinite raw values clamp");
/// assert_eq!(score.value(), 10.0);
/// assert_eq!(score.level(), RecommendationLevel::HighlyRecommended);
/// assert!(Score::from_raw(f64::NAN).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Score(f64);

impl Score {
    /// Clamp a raw oracle value.
    ///
    /// Infinities clamp to the nearest bound. NaN has no meaningful position
    /// in the range and yields `None`.
    #[must_use]
    pub fn from_raw(raw: f64) -> Option<Self> {
        if raw.is_nan() {
            return None;
        }
        Some(Self(raw.clamp(MIN_SCORE, MAX_SCORE)))
    }

    /// The clamped value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Bucket the score into a recommendation level.
    #[must_use]
    pub fn level(self) -> RecommendationLevel {
        RecommendationLevel::from_score(self.0)
    }
}
