//! Engine-wide defaults and bounds.

use std::time::Duration;

use tourscout_core::{ConfigurationError, InvalidRequestError};

/// Smallest search radius a request may ask for, in kilometres.
pub const MIN_MAX_DISTANCE_KM: f64 = 1.0;
/// Largest search radius a request may ask for, in kilometres.
pub const MAX_MAX_DISTANCE_KM: f64 = 500.0;
/// Smallest result count a request may ask for.
pub const MIN_TOP_N: usize = 1;
/// Largest result count a request may ask for.
pub const MAX_TOP_N: usize = 20;

/// Configuration for [`RecommendationService`](crate::RecommendationService).
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    /// Radius used when a request omits `max_distance_km`.
    pub default_max_distance_km: f64,
    /// Result count used when a request omits `top_n`.
    pub default_top_n: usize,
    /// Upper bound on a single oracle call, including the wait for a slot.
    ///
    /// A timed-out call is abandoned, not cancelled: its blocking thread runs
    /// to completion and holds its slot until then.
    pub scoring_timeout: Duration,
    /// Oracle calls in flight per request.
    pub scoring_concurrency: usize,
    /// Oracle calls occupying blocking threads across the whole service,
    /// abandoned calls included.
    pub max_blocking_calls: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_max_distance_km: 50.0,
            default_top_n: 5,
            scoring_timeout: Duration::from_millis(500),
            scoring_concurrency: 8,
            max_blocking_calls: 64,
        }
    }
}

impl EngineSettings {
    /// Check every setting against the bounds requests are held to.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidSetting`] naming the first
    /// offending setting.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_max_distance(self.default_max_distance_km).map_err(|err| {
            ConfigurationError::InvalidSetting {
                name: "max_distance_km",
                reason: err.to_string(),
            }
        })?;
        check_top_n(self.default_top_n).map_err(|err| ConfigurationError::InvalidSetting {
            name: "top_n",
            reason: err.to_string(),
        })?;
        if self.scoring_timeout.is_zero() {
            return Err(ConfigurationError::InvalidSetting {
                name: "scoring_timeout",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if self.scoring_concurrency == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "scoring_concurrency",
                reason: "must be at least 1".to_owned(),
            });
        }
        if self.max_blocking_calls == 0 {
            return Err(ConfigurationError::InvalidSetting {
                name: "max_blocking_calls",
                reason: "must be at least 1".to_owned(),
            });
        }
        Ok(())
    }

    /// Apply the default radius and check the bounds.
    ///
    /// # Errors
    /// Returns [`InvalidRequestError::MaxDistance`] when out of range.
    pub fn resolve_max_distance(&self, requested: Option<f64>) -> Result<f64, InvalidRequestError> {
        check_max_distance(requested.unwrap_or(self.default_max_distance_km))
    }

    /// Apply the default result count and check the bounds.
    ///
    /// # Errors
    /// Returns [`InvalidRequestError::TopN`] when out of range.
    pub fn resolve_top_n(&self, requested: Option<usize>) -> Result<usize, InvalidRequestError> {
        check_top_n(requested.unwrap_or(self.default_top_n))
    }
}

fn check_max_distance(value: f64) -> Result<f64, InvalidRequestError> {
    if (MIN_MAX_DISTANCE_KM..=MAX_MAX_DISTANCE_KM).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidRequestError::MaxDistance {
            value,
            min: MIN_MAX_DISTANCE_KM,
            max: MAX_MAX_DISTANCE_KM,
        })
    }
}

fn check_top_n(value: usize) -> Result<usize, InvalidRequestError> {
    if (MIN_TOP_N..=MAX_TOP_N).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidRequestError::TopN {
            value,
            min: MIN_TOP_N,
            max: MAX_TOP_N,
        })
    }
}
