//! Facade crate for the Tourscout recommendation engine.
//!
//! This crate re-exports the core domain types and exposes the recommendation
//! service and the concrete scoring oracles behind feature flags.

#![forbid(unsafe_code)]

pub use tourscout_core::{
    Candidate, CandidateGenerator, CatalogLoadError, ConfigurationError, DataError, EngineError,
    FeatureVector, Interest, InterestError, InvalidRequestError, LinearScan, Location,
    LocationCatalog, LocationRecord, OracleError, RecommendationLevel, ResolvedOrigin, Score,
    ScoredCandidate, ScoringContext, ScoringError, ScoringOracle, SearchOrigin, SpatialIndex,
    UserProfile, distance_km, rank,
};

#[cfg(feature = "engine")]
pub use tourscout_engine::{
    EngineSettings, HealthReport, HealthStatus, PredictRequest, PredictResponse,
    RecommendRequest, RecommendResponse, Recommendation, RecommendationService,
};

#[cfg(feature = "oracle")]
pub use tourscout_oracle::{
    ModelLoadError, SpecialistBoostConfig, SpecialistBoostOracle, TreeEnsembleOracle,
};
