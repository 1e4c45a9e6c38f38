//! Core domain types for the Tourscout recommendation engine.
//!
//! The crate models tourist locations, user interest profiles, and the pure
//! building blocks of a recommendation: great-circle distances, radius-bound
//! candidate generation, score clamping and bucketing, and deterministic
//! ranking. Predictive scoring sits behind the [`ScoringOracle`] trait so the
//! filtering and ranking code never names a concrete model.
//!
//! Constructors validate their input and return `Result` so malformed data
//! is rejected when it enters the system rather than deep inside a request.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use tourscout_core::{CandidateGenerator, LinearScan, LocationCatalog, LocationRecord};
//!
//! # fn main() -> Result<(), tourscout_core::DataError> {
//! let catalog = LocationCatalog::load([LocationRecord::new(
//!     "Galle Fort",
//!     [0.9, 0.1, 0.2, 0.8],
//!     true,
//!     6.0311,
//!     80.2170,
//! )])?;
//! let origin = Coord { x: 79.8612, y: 6.9271 };
//! let candidates = LinearScan.find_within(&catalog, origin, 150.0);
//! assert_eq!(candidates.len(), 1);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod candidates;
pub mod catalog;
mod error;
pub mod geodesy;
mod interest;
mod level;
mod location;
mod oracle;
mod origin;
mod profile;
mod rank;
mod score;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use candidates::{Candidate, CandidateGenerator, LinearScan, SpatialIndex};
pub use catalog::{CatalogLoadError, DataError, LocationCatalog, LocationRecord, OutdoorFlag};
pub use error::{ConfigurationError, EngineError, InvalidRequestError, ScoringError};
pub use geodesy::{EARTH_RADIUS_KM, distance_km, haversine_km};
pub use interest::{Interest, InterestError, Interests};
pub use level::RecommendationLevel;
pub use location::{Location, LocationError};
pub use oracle::{
    FEATURE_COUNT, FEATURE_NAMES, FeatureVector, OracleError, ScoringContext, ScoringOracle,
};
pub use origin::{OriginSpec, ResolvedOrigin, SearchOrigin};
pub use profile::UserProfile;
pub use rank::{ScoredCandidate, rank};
pub use score::{MAX_SCORE, MIN_SCORE, Score};
