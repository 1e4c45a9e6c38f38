//! Error kinds surfaced by the engine.
//!
//! Startup failures ([`DataError`], [`ConfigurationError`]) are fatal.
//! Everything else is scoped to a single request and never affects other
//! requests.

use std::time::Duration;

use thiserror::Error;

use crate::{DataError, InterestError, OracleError};

/// The engine cannot be configured as requested.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The predictive model artefact could not be loaded.
    #[error("model artefact {path} is unavailable: {source}")]
    ModelUnavailable {
        /// Location of the artefact.
        path: String,
        /// Underlying load failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A setting was outside its permitted range.
    #[error("invalid setting `{name}`: {reason}")]
    InvalidSetting {
        /// Setting name.
        name: &'static str,
        /// Human-readable constraint that was violated.
        reason: String,
    },
}

/// A request was malformed. Raised before any candidate work.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InvalidRequestError {
    /// Both a location name and coordinates were supplied.
    #[error("supply either target_location or current_lat/current_lng, not both")]
    AmbiguousOrigin,
    /// Neither a location name nor coordinates were supplied.
    #[error("supply either target_location or current_lat/current_lng")]
    MissingOrigin,
    /// Only one of latitude and longitude was supplied.
    #[error("current_lat and current_lng must be supplied together")]
    IncompleteCoordinates,
    /// The location name was empty after trimming.
    #[error("location name must not be empty")]
    EmptyLocationName,
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("latitude {0} must be within -90..=90")]
    Latitude(f64),
    /// Longitude outside `[-180, 180]` or not finite.
    #[error("longitude {0} must be within -180..=180")]
    Longitude(f64),
    /// A profile weight was invalid.
    #[error("invalid user profile: {0}")]
    Profile(#[from] InterestError),
    /// The search radius was outside the permitted range.
    #[error("max_distance_km {value} must be within {min}..={max}")]
    MaxDistance {
        /// Requested radius.
        value: f64,
        /// Smallest permitted radius.
        min: f64,
        /// Largest permitted radius.
        max: f64,
    },
    /// The result count was outside the permitted range.
    #[error("top_n {value} must be within {min}..={max}")]
    TopN {
        /// Requested count.
        value: usize,
        /// Smallest permitted count.
        min: usize,
        /// Largest permitted count.
        max: usize,
    },
}

/// Scoring failed for one candidate, failing the whole request.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// The oracle returned an error.
    #[error("oracle failed to score {location}: {source}")]
    Oracle {
        /// Candidate being scored.
        location: String,
        /// Failure reported by the oracle.
        #[source]
        source: OracleError,
    },
    /// The oracle did not answer within the configured timeout.
    #[error("oracle timed out after {timeout:?} scoring {location}")]
    Timeout {
        /// Candidate being scored.
        location: String,
        /// Configured per-call limit.
        timeout: Duration,
    },
    /// The oracle returned NaN.
    #[error("oracle returned a non-numeric score for {location}")]
    NonFinite {
        /// Candidate being scored.
        location: String,
    },
    /// The blocking worker running the oracle failed.
    #[error("scoring worker for {location} failed: {message}")]
    Worker {
        /// Candidate being scored.
        location: String,
        /// Description of the worker failure.
        message: String,
    },
}

/// Every failure the engine reports.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Catalog records were malformed.
    #[error(transparent)]
    Data(#[from] DataError),
    /// The engine could not be configured.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// A named location is not in the catalog.
    #[error("location {name:?} was not found")]
    NotFound {
        /// Name as supplied by the caller.
        name: String,
    },
    /// The request was malformed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequestError),
    /// The oracle failed for a candidate.
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl EngineError {
    /// Whether the error prevents the engine from starting at all.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Data(_) | Self::Configuration(_))
    }
}

impl From<InterestError> for EngineError {
    fn from(error: InterestError) -> Self {
        Self::InvalidRequest(InvalidRequestError::Profile(error))
    }
}
