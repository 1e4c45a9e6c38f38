//! Recommendation levels derived from scores.

/// Score at or above which a location is highly recommended.
const HIGHLY_RECOMMENDED_FROM: f64 = 7.5;
/// Score at or above which a location is recommended.
const RECOMMENDED_FROM: f64 = 6.0;
/// Score at or above which a location might be enjoyed.
const MIGHT_ENJOY_FROM: f64 = 4.0;

/// Coarse label for a score.
///
/// # Examples
/// ```
/// use tourscout_core::RecommendationLevel;
///
/// assert_eq!(RecommendationLevel::from_score(7.5), RecommendationLevel::HighlyRecommended);
/// assert_eq!(RecommendationLevel::from_score(7.4999).as_str(), "RECOMMENDED");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RecommendationLevel {
    /// Score below 4.0.
    #[cfg_attr(feature = "serde", serde(alias = "NOT RECOMMENDED"))]
    NotRecommended,
    /// Score in `[4.0, 6.0)`.
    #[cfg_attr(feature = "serde", serde(alias = "MIGHT ENJOY"))]
    MightEnjoy,
    /// Score in `[6.0, 7.5)`.
    Recommended,
    /// Score of 7.5 or more.
    #[cfg_attr(feature = "serde", serde(alias = "HIGHLY RECOMMENDED"))]
    HighlyRecommended,
}

impl RecommendationLevel {
    /// Bucket a score. The mapping is monotonic in `score`.
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= HIGHLY_RECOMMENDED_FROM {
            Self::HighlyRecommended
        } else if score >= RECOMMENDED_FROM {
            Self::Recommended
        } else if score >= MIGHT_ENJOY_FROM {
            Self::MightEnjoy
        } else {
            Self::NotRecommended
        }
    }

    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::HighlyRecommended => "HIGHLY_RECOMMENDED",
            Self::Recommended => "RECOMMENDED",
            Self::MightEnjoy => "MIGHT_ENJOY",
            Self::NotRecommended => "NOT_RECOMMENDED",
        }
    }
}

impl std::fmt::Display for RecommendationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
