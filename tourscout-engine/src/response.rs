//! Response payloads produced by the service.
//!
//! Field names match the JSON documents callers consume, so renaming a field
//! is a wire-format change.

use serde::{Deserialize, Serialize};
use tourscout_core::{Interest, Location, RecommendationLevel, ResolvedOrigin, ScoredCandidate};

use crate::UserProfilePayload;

/// Ratings and position of a location, keyed like the oracle features.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocationAttributes {
    /// Historical rating.
    pub l_hist: f64,
    /// Adventure rating.
    pub l_adv: f64,
    /// Nature rating.
    pub l_nat: f64,
    /// Relaxation rating.
    pub l_rel: f64,
    /// `1.0` for outdoor locations, `0.0` otherwise.
    pub l_outdoor: f64,
    /// Latitude in degrees.
    pub l_lat: f64,
    /// Longitude in degrees.
    pub l_lng: f64,
}

impl From<&Location> for LocationAttributes {
    fn from(location: &Location) -> Self {
        Self {
            l_hist: location.rating(Interest::History),
            l_adv: location.rating(Interest::Adventure),
            l_nat: location.rating(Interest::Nature),
            l_rel: location.rating(Interest::Relaxation),
            l_outdoor: outdoor_flag(location),
            l_lat: location.latitude(),
            l_lng: location.longitude(),
        }
    }
}

fn outdoor_flag(location: &Location) -> f64 {
    f64::from(u8::from(location.is_outdoor()))
}

/// Result of scoring one named location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictResponse {
    /// Canonical catalog name.
    pub location_name: String,
    /// Clamped score in `[1, 10]`.
    pub predicted_score: f64,
    /// Level bucket for `predicted_score`.
    pub recommendation_level: RecommendationLevel,
    /// Attributes fed to the oracle.
    pub location_attributes: LocationAttributes,
}

/// Headline ratings for a recommended location.
///
/// Decoding also accepts `religious` for the relaxation rating.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Highlights {
    /// Historical rating.
    pub historical: f64,
    /// Adventure rating.
    pub adventure: f64,
    /// Nature rating.
    pub nature: f64,
    /// Relaxation rating.
    #[serde(alias = "religious")]
    pub relaxation: f64,
    /// `1.0` for outdoor locations, `0.0` otherwise.
    pub outdoor: f64,
}

impl From<&Location> for Highlights {
    fn from(location: &Location) -> Self {
        Self {
            historical: location.rating(Interest::History),
            adventure: location.rating(Interest::Adventure),
            nature: location.rating(Interest::Nature),
            relaxation: location.rating(Interest::Relaxation),
            outdoor: outdoor_flag(location),
        }
    }
}

/// One ranked entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// One-based position in the ranking.
    pub rank: usize,
    /// Canonical catalog name.
    pub location_name: String,
    /// Clamped score in `[1, 10]`.
    pub predicted_score: f64,
    /// Level bucket for `predicted_score`.
    pub recommendation_level: RecommendationLevel,
    /// Great-circle distance from the search origin.
    pub distance_km: f64,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Location ratings.
    pub highlights: Highlights,
}

impl Recommendation {
    /// Describe `entry` at one-based position `rank`.
    #[must_use]
    pub fn new(rank: usize, entry: &ScoredCandidate<'_>) -> Self {
        let location = entry.location();
        Self {
            rank,
            location_name: location.name().to_owned(),
            predicted_score: entry.score.value(),
            recommendation_level: entry.level,
            distance_km: entry.distance_km(),
            latitude: location.latitude(),
            longitude: location.longitude(),
            highlights: Highlights::from(location),
        }
    }
}

/// Where the search started.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SearchOriginInfo {
    /// A catalog location.
    Location {
        /// Canonical catalog name.
        name: String,
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
    },
    /// Caller-supplied coordinates.
    Gps {
        /// Latitude in degrees.
        lat: f64,
        /// Longitude in degrees.
        lng: f64,
    },
}

impl From<&ResolvedOrigin<'_>> for SearchOriginInfo {
    fn from(origin: &ResolvedOrigin<'_>) -> Self {
        match origin {
            ResolvedOrigin::Location(location) => Self::Location {
                name: location.name().to_owned(),
                lat: location.latitude(),
                lng: location.longitude(),
            },
            ResolvedOrigin::Coordinates(position) => Self::Gps {
                lat: position.y,
                lng: position.x,
            },
        }
    }
}

/// Ranked recommendations around an origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendResponse {
    /// Resolved search origin.
    pub search_origin: SearchOriginInfo,
    /// Candidates inside the radius before truncation.
    pub total_candidates: usize,
    /// At most `top_n` entries, best first.
    pub recommendations: Vec<Recommendation>,
    /// Radius actually searched.
    pub max_distance_km: f64,
    /// Profile the scores were computed for.
    pub user_profile: UserProfilePayload,
}

/// Whether the service can answer requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Model ready and catalog non-empty.
    Healthy,
    /// Missing model or empty catalog.
    Degraded,
}

/// Service readiness summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// Overall status.
    pub status: HealthStatus,
    /// Engine version.
    pub version: String,
    /// Whether the oracle reports ready.
    pub model_loaded: bool,
    /// Number of catalog locations.
    pub locations_loaded: usize,
}

impl HealthReport {
    /// Derive the status from its inputs.
    #[must_use]
    pub fn new(model_loaded: bool, locations_loaded: usize) -> Self {
        let status = if model_loaded && locations_loaded > 0 {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };
        Self {
            status,
            version: env!("CARGO_PKG_VERSION").to_owned(),
            model_loaded,
            locations_loaded,
        }
    }
}
