//! `RecommendationService`: origin resolution, candidate generation,
//! concurrent scoring, and ranking.

use std::sync::Arc;

use futures_util::{StreamExt, TryStreamExt, stream};
use tokio::sync::Semaphore;
use tourscout_core::{
    Candidate, CandidateGenerator, ConfigurationError, EngineError, FeatureVector,
    InvalidRequestError, LinearScan, Location, LocationCatalog, RecommendationLevel,
    ResolvedOrigin, Score, ScoredCandidate, ScoringContext, ScoringError, ScoringOracle,
    SearchOrigin, UserProfile, rank,
};

use crate::{
    EngineSettings, HealthReport, LocationAttributes, PredictRequest, PredictResponse,
    RecommendRequest, RecommendResponse, Recommendation, SearchOriginInfo, UserProfilePayload,
};

/// Score for one location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction<'a> {
    /// Scored catalog entry.
    pub location: &'a Location,
    /// Clamped score.
    pub score: Score,
    /// Level derived from `score`.
    pub level: RecommendationLevel,
}

/// A validated recommendation request.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationQuery {
    /// Traveller preferences.
    pub profile: UserProfile,
    /// Where to search from.
    pub origin: SearchOrigin,
    /// Inclusive search radius in kilometres.
    pub max_distance_km: f64,
    /// Maximum number of results.
    pub top_n: usize,
    /// Situational context for every oracle call.
    pub context: ScoringContext,
}

/// Ranked candidates for a [`RecommendationQuery`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult<'a> {
    /// The origin after catalog lookup.
    pub origin: ResolvedOrigin<'a>,
    /// At most `top_n` candidates, best first.
    pub ranked: Vec<ScoredCandidate<'a>>,
    /// Candidates inside the radius before truncation.
    pub total_candidates: usize,
    /// Radius searched.
    pub max_distance_km: f64,
}

/// Recommendation engine over an immutable catalog and a scoring oracle.
///
/// Build one at startup and share it behind an `Arc`; every operation takes
/// `&self`, and requests never observe each other.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use tourscout_core::test_support::{FixedOracle, sample_catalog};
/// use tourscout_engine::{RecommendRequest, RecommendationService, UserProfilePayload};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let service = RecommendationService::new(Arc::new(sample_catalog()?), Arc::new(FixedOracle(8.0)))?;
/// let request = RecommendRequest {
///     user_profile: UserProfilePayload { u_hist: 0.9, u_adv: 0.1, u_nat: 0.2, u_rel: 0.3 },
///     target_location: Some("lotus tower".into()),
///     max_distance_km: Some(10.0),
///     ..RecommendRequest::default()
/// };
/// let response = service.recommend(&request).await?;
/// assert_eq!(response.total_candidates, 4);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RecommendationService<O, G = LinearScan> {
    catalog: Arc<LocationCatalog>,
    oracle: Arc<O>,
    generator: G,
    settings: EngineSettings,
    oracle_slots: Arc<Semaphore>,
}

impl<O> RecommendationService<O, LinearScan>
where
    O: ScoringOracle + 'static,
{
    /// Construct a service with the linear-scan generator and default settings.
    ///
    /// # Errors
    /// See [`RecommendationService::with_settings`].
    pub fn new(catalog: Arc<LocationCatalog>, oracle: Arc<O>) -> Result<Self, ConfigurationError> {
        Self::with_settings(catalog, oracle, LinearScan, EngineSettings::default())
    }
}

impl<O, G> RecommendationService<O, G>
where
    O: ScoringOracle + 'static,
    G: CandidateGenerator,
{
    /// Construct a service with an explicit generator and settings.
    ///
    /// # Errors
    /// Returns [`ConfigurationError::InvalidSetting`] when `settings` fail
    /// validation.
    pub fn with_settings(
        catalog: Arc<LocationCatalog>,
        oracle: Arc<O>,
        generator: G,
        settings: EngineSettings,
    ) -> Result<Self, ConfigurationError> {
        settings.validate()?;
        log::info!(
            "recommendation service ready: {} locations, oracle ready: {}",
            catalog.len(),
            oracle.is_ready()
        );
        let oracle_slots = Arc::new(Semaphore::new(
            settings.max_blocking_calls.min(Semaphore::MAX_PERMITS),
        ));
        Ok(Self {
            catalog,
            oracle,
            generator,
            settings,
            oracle_slots,
        })
    }

    /// The catalog the service searches.
    #[must_use]
    pub fn catalog(&self) -> &LocationCatalog {
        &self.catalog
    }

    /// Active settings.
    #[must_use]
    pub const fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Look up a named origin or pass coordinates through.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for an unknown name.
    pub fn resolve_origin(&self, origin: &SearchOrigin) -> Result<ResolvedOrigin<'_>, EngineError> {
        match origin {
            SearchOrigin::Named(name) => self
                .catalog
                .lookup(name)
                .map(ResolvedOrigin::Location)
                .ok_or_else(|| EngineError::NotFound { name: name.clone() }),
            SearchOrigin::Coordinates(position) => Ok(ResolvedOrigin::Coordinates(*position)),
        }
    }

    /// Score a single named location.
    ///
    /// # Errors
    /// Returns [`InvalidRequestError::EmptyLocationName`] for a blank name,
    /// [`EngineError::NotFound`] for an unknown one, and
    /// [`EngineError::Scoring`] when the oracle fails.
    pub async fn predict_location(
        &self,
        profile: &UserProfile,
        name: &str,
        context: ScoringContext,
    ) -> Result<Prediction<'_>, EngineError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(InvalidRequestError::EmptyLocationName.into());
        }
        let location = self
            .catalog
            .lookup(trimmed)
            .ok_or_else(|| EngineError::NotFound {
                name: trimmed.to_owned(),
            })?;
        let score = self
            .score_location(location, FeatureVector::new(profile, location, context))
            .await?;
        log::debug!("predicted {score:?} for {}", location.name());
        Ok(Prediction {
            location,
            score,
            level: score.level(),
        })
    }

    /// Resolve, filter, score, and rank.
    ///
    /// Oracle calls for one query run concurrently, bounded by
    /// [`EngineSettings::scoring_concurrency`]; results keep candidate order
    /// before ranking so ties resolve by catalog order.
    ///
    /// # Errors
    /// Returns [`EngineError::NotFound`] for an unknown named origin and
    /// [`EngineError::Scoring`] when any oracle call fails or times out.
    pub async fn recommend_query(
        &self,
        query: &RecommendationQuery,
    ) -> Result<RecommendationResult<'_>, EngineError> {
        let origin = self.resolve_origin(&query.origin)?;
        let candidates =
            self.generator
                .find_within(&self.catalog, origin.position(), query.max_distance_km);
        let total_candidates = candidates.len();
        log::debug!(
            "{total_candidates} candidates within {} km of {:?}",
            query.max_distance_km,
            origin.position()
        );

        let scored = self
            .score_candidates(&query.profile, candidates, query.context)
            .await?;
        Ok(RecommendationResult {
            origin,
            ranked: rank(scored, query.top_n),
            total_candidates,
            max_distance_km: query.max_distance_km,
        })
    }

    /// Validate a wire-level recommendation request.
    ///
    /// # Errors
    /// Returns [`InvalidRequestError`] for a bad profile, an under- or
    /// over-specified origin, or a radius or result count out of range.
    pub fn query_from_request(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendationQuery, InvalidRequestError> {
        Ok(RecommendationQuery {
            profile: request.user_profile.to_profile()?,
            origin: SearchOrigin::try_from(request.origin_spec())?,
            max_distance_km: self.settings.resolve_max_distance(request.max_distance_km)?,
            top_n: self.settings.resolve_top_n(request.top_n)?,
            context: request.context(),
        })
    }

    /// Answer a predict request.
    ///
    /// # Errors
    /// See [`RecommendationService::predict_location`]; an invalid profile is
    /// reported as [`EngineError::InvalidRequest`].
    pub async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse, EngineError> {
        let profile = request.user_profile.to_profile()?;
        let prediction = self
            .predict_location(
                &profile,
                &request.location_name,
                ScoringContext::new(request.raining),
            )
            .await?;
        Ok(PredictResponse {
            location_name: prediction.location.name().to_owned(),
            predicted_score: prediction.score.value(),
            recommendation_level: prediction.level,
            location_attributes: LocationAttributes::from(prediction.location),
        })
    }

    /// Answer a recommend request.
    ///
    /// # Errors
    /// Returns [`EngineError::InvalidRequest`] before any candidate work when
    /// the request is malformed; otherwise see
    /// [`RecommendationService::recommend_query`].
    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<RecommendResponse, EngineError> {
        let query = self.query_from_request(request)?;
        let result = self.recommend_query(&query).await?;
        Ok(RecommendResponse {
            search_origin: SearchOriginInfo::from(&result.origin),
            total_candidates: result.total_candidates,
            recommendations: result
                .ranked
                .iter()
                .zip(1..)
                .map(|(entry, position)| Recommendation::new(position, entry))
                .collect(),
            max_distance_km: result.max_distance_km,
            user_profile: UserProfilePayload::from(&query.profile),
        })
    }

    /// Report readiness.
    #[must_use]
    pub fn health(&self) -> HealthReport {
        HealthReport::new(self.oracle.is_ready(), self.catalog.len())
    }

    async fn score_candidates<'c>(
        &self,
        profile: &UserProfile,
        candidates: Vec<Candidate<'c>>,
        context: ScoringContext,
    ) -> Result<Vec<ScoredCandidate<'c>>, ScoringError> {
        stream::iter(candidates.into_iter().map(|candidate| async move {
            let features = FeatureVector::new(profile, candidate.location, context);
            self.score_location(candidate.location, features)
                .await
                .map(|score| ScoredCandidate::new(candidate, score))
        }))
        .buffered(self.settings.scoring_concurrency)
        .try_collect()
        .await
    }

    /// Run one oracle call on the blocking pool under the scoring timeout.
    ///
    /// Each call holds an oracle slot until its worker thread returns. A call
    /// that times out keeps running and keeps its slot; its result is
    /// discarded. Waiting for a free slot counts against the timeout.
    async fn score_location(
        &self,
        location: &Location,
        features: FeatureVector,
    ) -> Result<Score, ScoringError> {
        let oracle = Arc::clone(&self.oracle);
        let slots = Arc::clone(&self.oracle_slots);
        let timeout = self.settings.scoring_timeout;
        let call = async move {
            let permit = slots
                .acquire_owned()
                .await
                .map_err(|err| err.to_string())?;
            tokio::task::spawn_blocking(move || {
                let raw = oracle.score(&features);
                drop(permit);
                raw
            })
            .await
            .map_err(|err| err.to_string())
        };

        let outcome = tokio::time::timeout(timeout, call).await.map_err(|_| {
            log::warn!("oracle timed out after {timeout:?} scoring {}", location.name());
            ScoringError::Timeout {
                location: location.name().to_owned(),
                timeout,
            }
        })?;
        let raw = outcome
            .map_err(|message| ScoringError::Worker {
                location: location.name().to_owned(),
                message,
            })?
            .map_err(|source| {
                log::warn!("oracle failed for {}: {source}", location.name());
                ScoringError::Oracle {
                    location: location.name().to_owned(),
                    source,
                }
            })?;
        Score::from_raw(raw).ok_or_else(|| ScoringError::NonFinite {
            location: location.name().to_owned(),
        })
    }
}
