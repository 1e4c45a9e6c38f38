//! Request payloads accepted by the service.

use serde::{Deserialize, Serialize};
use tourscout_core::{Interest, InterestError, OriginSpec, ScoringContext, UserProfile};

/// Interest weights as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct UserProfilePayload {
    /// Interest in historical sites.
    pub u_hist: f64,
    /// Interest in adventure activities.
    pub u_adv: f64,
    /// Interest in nature.
    pub u_nat: f64,
    /// Interest in relaxation.
    pub u_rel: f64,
}

impl UserProfilePayload {
    /// Validate the weights.
    ///
    /// # Errors
    /// Returns [`InterestError`] for a weight outside `[0, 1]`.
    pub fn to_profile(self) -> Result<UserProfile, InterestError> {
        UserProfile::new(self.u_hist, self.u_adv, self.u_nat, self.u_rel)
    }
}

impl From<&UserProfile> for UserProfilePayload {
    fn from(profile: &UserProfile) -> Self {
        Self {
            u_hist: profile.weight(Interest::History),
            u_adv: profile.weight(Interest::Adventure),
            u_nat: profile.weight(Interest::Nature),
            u_rel: profile.weight(Interest::Relaxation),
        }
    }
}

/// Score one named location for a traveller.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PredictRequest {
    /// Traveller preferences.
    pub user_profile: UserProfilePayload,
    /// Catalog name, matched case-insensitively after trimming.
    pub location_name: String,
    /// Whether it is raining at the destination.
    #[serde(default)]
    pub raining: bool,
}

/// Rank locations around an origin for a traveller.
///
/// Exactly one origin form must be present: `target_location`, or both
/// `current_lat` and `current_lng`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct RecommendRequest {
    /// Traveller preferences.
    pub user_profile: UserProfilePayload,
    /// Catalog location to search around.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_location: Option<String>,
    /// Latitude to search around.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_lat: Option<f64>,
    /// Longitude to search around.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_lng: Option<f64>,
    /// Search radius; the engine default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance_km: Option<f64>,
    /// Result count; the engine default applies when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    /// Whether it is raining around the origin.
    #[serde(default)]
    pub raining: bool,
}

impl RecommendRequest {
    /// Origin fields of the request.
    #[must_use]
    pub fn origin_spec(&self) -> OriginSpec {
        OriginSpec {
            target_location: self.target_location.clone(),
            current_lat: self.current_lat,
            current_lng: self.current_lng,
        }
    }

    /// Scoring context of the request.
    #[must_use]
    pub const fn context(&self) -> ScoringContext {
        ScoringContext::new(self.raining)
    }
}
