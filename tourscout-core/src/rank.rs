//! Deterministic ordering of scored candidates.

use std::cmp::Ordering;

use crate::{Candidate, Location, RecommendationLevel, Score};

/// A candidate with its clamped score and level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredCandidate<'a> {
    /// Location and distance from the origin.
    pub candidate: Candidate<'a>,
    /// Clamped desirability score.
    pub score: Score,
    /// Level derived from `score`.
    pub level: RecommendationLevel,
}

impl<'a> ScoredCandidate<'a> {
    /// Attach a score and derive its level.
    #[must_use]
    pub fn new(candidate: Candidate<'a>, score: Score) -> Self {
        Self {
            candidate,
            score,
            level: score.level(),
        }
    }

    /// The scored location.
    #[must_use]
    pub const fn location(&self) -> &'a Location {
        self.candidate.location
    }

    /// Distance from the origin in kilometres.
    #[must_use]
    pub const fn distance_km(&self) -> f64 {
        self.candidate.distance_km
    }
}

/// Sort by score descending then distance ascending, and keep `top_n`.
///
/// The sort is stable: entries tied on both keys keep their input order,
/// which is catalog order when fed straight from a candidate generator.
///
/// # Examples
/// ```
/// use tourscout_core::{Candidate, LocationCatalog, LocationRecord, Score, ScoredCandidate, rank};
///
/// # fn main() -> Result<(), tourscout_core::DataError> {
/// let catalog = LocationCatalog::load([
///     LocationRecord::new("A", [0.0; 4], true, 0.0, 0.0),
///     LocationRecord::new("B", [0.0; 4], true, 0.0, 0.1),
/// ])?;
/// let [a, b] = [0, 1].map(|slot| &catalog.all()[slot]);
/// let scored = vec![
///     ScoredCandidate::new(Candidate { location: a, distance_km: 10.0 }, Score::from_raw(6.0).unwrap()),
///     ScoredCandidate::new(Candidate { location: b, distance_km: 5.0 }, Score::from_raw(8.0).unwrap()),
/// ];
/// let ranked = rank(scored, 1);
/// assert_eq!(ranked[0].location().name(), "B");
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn rank(mut scored: Vec<ScoredCandidate<'_>>, top_n: usize) -> Vec<ScoredCandidate<'_>> {
    scored.sort_by(compare);
    scored.truncate(top_n);
    scored
}

fn compare(a: &ScoredCandidate<'_>, b: &ScoredCandidate<'_>) -> Ordering {
    b.score
        .value()
        .total_cmp(&a.score.value())
        .then_with(|| a.distance_km().total_cmp(&b.distance_km()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LocationCatalog, LocationRecord};
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> LocationCatalog {
        LocationCatalog::load(
            ["A", "B", "C", "D"]
                .into_iter()
                .map(|name| LocationRecord::new(name, [0.5; 4], true, 7.0, 80.0)),
        )
        .expect("valid catalog")
    }

    fn scored<'a>(
        catalog: &'a LocationCatalog,
        name: &str,
        score: f64,
        distance_km: f64,
    ) -> ScoredCandidate<'a> {
        let location = catalog.lookup(name).expect("known location");
        ScoredCandidate::new(
            Candidate {
                location,
                distance_km,
            },
            Score::from_raw(score).expect("finite score"),
        )
    }

    fn names(ranked: &[ScoredCandidate<'_>]) -> Vec<String> {
        ranked
            .iter()
            .map(|entry| entry.location().name().to_owned())
            .collect()
    }

    #[rstest]
    fn orders_by_score_then_distance(catalog: LocationCatalog) {
        let input = vec![
            scored(&catalog, "A", 8.0, 10.0),
            scored(&catalog, "B", 8.0, 5.0),
            scored(&catalog, "C", 9.0, 50.0),
        ];
        assert_eq!(names(&rank(input, 2)), ["C", "B"]);
    }

    #[rstest]
    fn equal_scores_prefer_the_nearer_site(catalog: LocationCatalog) {
        let input = vec![
            scored(&catalog, "A", 8.0, 5.0),
            scored(&catalog, "B", 8.0, 3.0),
            scored(&catalog, "C", 6.0, 1.0),
        ];
        let ranked = rank(input, 3);
        let keys: Vec<(f64, f64)> = ranked
            .iter()
            .map(|entry| (entry.score.value(), entry.distance_km()))
            .collect();
        assert_eq!(keys, [(8.0, 3.0), (8.0, 5.0), (6.0, 1.0)]);
        assert_eq!(names(&ranked), ["B", "A", "C"]);
    }

    #[rstest]
    fn full_ties_keep_input_order(catalog: LocationCatalog) {
        let input = vec![
            scored(&catalog, "D", 6.0, 3.0),
            scored(&catalog, "A", 6.0, 3.0),
            scored(&catalog, "B", 6.0, 3.0),
        ];
        assert_eq!(names(&rank(input, 5)), ["D", "A", "B"]);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(2, 2)]
    #[case(10, 4)]
    fn never_exceeds_top_n_or_input(
        catalog: LocationCatalog,
        #[case] top_n: usize,
        #[case] expected: usize,
    ) {
        let input = vec![
            scored(&catalog, "A", 2.0, 1.0),
            scored(&catalog, "B", 3.0, 1.0),
            scored(&catalog, "C", 4.0, 1.0),
            scored(&catalog, "D", 5.0, 1.0),
        ];
        assert_eq!(rank(input, top_n).len(), expected);
    }

    #[rstest]
    fn level_tracks_score(catalog: LocationCatalog) {
        let entry = scored(&catalog, "A", 7.5, 1.0);
        assert_eq!(entry.level, RecommendationLevel::HighlyRecommended);
    }
}
