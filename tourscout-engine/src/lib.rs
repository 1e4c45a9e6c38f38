//! Recommendation service for Tourscout.
//!
//! [`RecommendationService`] ties the pieces in `tourscout-core` together:
//! it resolves a search origin against a [`LocationCatalog`], asks a
//! [`CandidateGenerator`] for locations within the radius, scores every
//! candidate through a [`ScoringOracle`], and ranks the results.
//!
//! Oracle calls are synchronous and may be slow, so each one runs on tokio's
//! blocking pool under a timeout. A single request fans its calls out through
//! an order-preserving buffered stream; concurrent requests share nothing
//! mutable.
//!
//! [`LocationCatalog`]: tourscout_core::LocationCatalog
//! [`CandidateGenerator`]: tourscout_core::CandidateGenerator
//! [`ScoringOracle`]: tourscout_core::ScoringOracle

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod request;
mod response;
mod service;
mod settings;

pub use request::{PredictRequest, RecommendRequest, UserProfilePayload};
pub use response::{
    HealthReport, HealthStatus, Highlights, LocationAttributes, PredictResponse,
    RecommendResponse, Recommendation, SearchOriginInfo,
};
pub use service::{Prediction, RecommendationQuery, RecommendationResult, RecommendationService};
pub use settings::{
    EngineSettings, MAX_MAX_DISTANCE_KM, MAX_TOP_N, MIN_MAX_DISTANCE_KM, MIN_TOP_N,
};
