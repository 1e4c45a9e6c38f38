//! Deterministic baseline oracle rewarding single-axis specialists.
//!
//! For each interest axis the match is `user weight × location rating`. The
//! strongest match dominates the score, the remaining distinct matches add a
//! smaller contribution, a very strong primary match earns a bonus, and
//! outdoor locations are penalised while it rains.

use std::cmp::Ordering;

use tourscout_core::{FeatureVector, Interest, OracleError, ScoringOracle};

/// Tuning knobs for [`SpecialistBoostOracle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialistBoostConfig {
    /// Multiplier for the strongest axis match.
    pub primary_weight: f64,
    /// Multiplier for the mean of the other matches.
    pub secondary_weight: f64,
    /// Primary match above which the bonus applies.
    pub specialist_threshold: f64,
    /// Bonus for a primary match above the threshold.
    pub specialist_bonus: f64,
    /// Deduction for an outdoor location in the rain.
    pub rain_penalty: f64,
}

impl Default for SpecialistBoostConfig {
    fn default() -> Self {
        Self {
            primary_weight: 7.0,
            secondary_weight: 3.0,
            specialist_threshold: 0.8,
            specialist_bonus: 1.5,
            rain_penalty: 5.0,
        }
    }
}

/// Heuristic oracle returning raw values in `[0, 10]`.
///
/// # Examples
/// ```
/// use tourscout_core::{FeatureVector, ScoringOracle};
/// use tourscout_oracle::SpecialistBoostOracle;
///
/// // A pure historian at a purely historical indoor site.
/// let mut values = [0.0; 12];
/// values[0] = 1.0;
/// values[4] = 1.0;
/// let oracle = SpecialistBoostOracle::new();
/// let score = oracle.score(&FeatureVector::from_array(values)).expect("finite");
/// assert_eq!(score, 8.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpecialistBoostOracle {
    config: SpecialistBoostConfig,
}

impl SpecialistBoostOracle {
    /// Oracle with the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Oracle with custom tuning.
    #[must_use]
    pub const fn with_config(config: SpecialistBoostConfig) -> Self {
        Self { config }
    }

    /// Active tuning.
    #[must_use]
    pub const fn config(&self) -> &SpecialistBoostConfig {
        &self.config
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "mean of a handful of axis matches"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "at most four interest axes are counted"
)]
fn mean_excluding(matches: &[f64], primary: f64) -> f64 {
    let (sum, count) = matches
        .iter()
        .filter(|value| value.total_cmp(&primary) != Ordering::Equal)
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

impl ScoringOracle for SpecialistBoostOracle {
    #[expect(
        clippy::float_arithmetic,
        reason = "heuristic score combines weighted matches"
    )]
    fn score(&self, features: &FeatureVector) -> Result<f64, OracleError> {
        let matches = Interest::ALL.map(|axis| features.user(axis) * features.location(axis));
        if matches.iter().any(|value| value.is_nan()) {
            return Err(OracleError::InvalidInput(
                "interest features must be numeric".to_owned(),
            ));
        }
        let primary = matches.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let config = &self.config;

        let mut raw = config.primary_weight * primary
            + config.secondary_weight * mean_excluding(&matches, primary);
        if primary > config.specialist_threshold {
            raw += config.specialist_bonus;
        }
        if features.raining() && features.outdoor() {
            raw -= config.rain_penalty;
        }
        Ok(raw.clamp(0.0, 10.0))
    }
}
