//! Concurrent requests against a shared service do not affect each other.
#![expect(clippy::expect_used, reason = "tests fail fast on fixture errors")]

use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use tourscout_core::test_support::{FnOracle, sample_catalog};
use tourscout_core::{EngineError, FeatureVector, LinearScan, OracleError, ScoringError};
use tourscout_engine::{
    EngineSettings, RecommendRequest, RecommendationService, UserProfilePayload,
};

type RainSensitive = FnOracle<fn(&FeatureVector) -> Result<f64, OracleError>>;

/// Answers instantly in dry weather and stalls while it rains.
fn stall_in_rain(features: &FeatureVector) -> Result<f64, OracleError> {
    if features.raining() {
        std::thread::sleep(Duration::from_millis(250));
    }
    Ok(7.0)
}

#[fixture]
fn service() -> Arc<RecommendationService<RainSensitive>> {
    let catalog = Arc::new(sample_catalog().expect("sample catalog is valid"));
    let oracle: RainSensitive = FnOracle::new(stall_in_rain);
    let settings = EngineSettings {
        scoring_timeout: Duration::from_millis(50),
        scoring_concurrency: 2,
        ..EngineSettings::default()
    };
    Arc::new(
        RecommendationService::with_settings(catalog, Arc::new(oracle), LinearScan, settings)
            .expect("valid settings"),
    )
}

fn request(raining: bool) -> RecommendRequest {
    RecommendRequest {
        user_profile: UserProfilePayload {
            u_hist: 0.5,
            u_adv: 0.5,
            u_nat: 0.5,
            u_rel: 0.5,
        },
        target_location: Some("Galle Fort".to_owned()),
        max_distance_km: Some(30.0),
        raining,
        ..RecommendRequest::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn a_timed_out_request_leaves_its_neighbour_intact(
    service: Arc<RecommendationService<RainSensitive>>,
) {
    let wet_request = request(true);
    let dry_request = request(false);
    let (wet, dry) = tokio::join!(
        service.recommend(&wet_request),
        service.recommend(&dry_request)
    );

    assert!(matches!(
        wet,
        Err(EngineError::Scoring(ScoringError::Timeout { .. }))
    ));
    let dry = dry.expect("dry request succeeds");
    assert!(!dry.recommendations.is_empty());
    assert!(
        dry.recommendations
            .iter()
            .all(|entry| entry.predicted_score == 7.0)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn many_concurrent_requests_agree(service: Arc<RecommendationService<RainSensitive>>) {
    let dry_request = request(false);
    let responses = futures_util::future::join_all(
        (0..16).map(|_| service.recommend(&dry_request)),
    )
    .await;
    let first = responses
        .first()
        .expect("sixteen responses")
        .as_ref()
        .expect("dry request succeeds");
    for response in &responses {
        assert_eq!(response.as_ref().expect("dry request succeeds"), first);
    }
}
