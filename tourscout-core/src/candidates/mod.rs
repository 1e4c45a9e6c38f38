//! Radius-bound candidate generation.
//!
//! A generator returns every catalog location whose great-circle distance
//! from the origin is at most the radius, tagged with that distance. The
//! boundary is inclusive and results follow catalog order, so all generators
//! are interchangeable.

use geo::Coord;

use crate::{Location, LocationCatalog, haversine_km};

mod spatial;

pub use spatial::SpatialIndex;

/// A location within the search radius of the current request's origin.
///
/// Distances are always computed for the request at hand and never cached on
/// the location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// Borrowed catalog entry.
    pub location: &'a Location,
    /// Great-circle distance from the origin in kilometres.
    pub distance_km: f64,
}

/// Produce candidate locations within a radius of an origin.
///
/// Implementations must be thread-safe (`Send` + `Sync`) so one generator can
/// serve concurrent requests.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use tourscout_core::{Candidate, CandidateGenerator, LocationCatalog};
///
/// struct Nothing;
///
/// impl CandidateGenerator for Nothing {
///     fn find_within<'c>(
///         &self,
///         _catalog: &'c LocationCatalog,
///         _origin: Coord<f64>,
///         _radius_km: f64,
///     ) -> Vec<Candidate<'c>> {
///         Vec::new()
///     }
/// }
///
/// let catalog = LocationCatalog::default();
/// assert!(Nothing.find_within(&catalog, Coord { x: 0.0, y: 0.0 }, 10.0).is_empty());
/// ```
pub trait CandidateGenerator: Send + Sync {
    /// Return locations with `distance <= radius_km`, in catalog order.
    fn find_within<'c>(
        &self,
        catalog: &'c LocationCatalog,
        origin: Coord<f64>,
        radius_km: f64,
    ) -> Vec<Candidate<'c>>;
}

/// Exhaustive scan over the catalog.
///
/// Suitable for catalogs of a few thousand entries; use [`SpatialIndex`] for
/// larger ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearScan;

impl CandidateGenerator for LinearScan {
    fn find_within<'c>(
        &self,
        catalog: &'c LocationCatalog,
        origin: Coord<f64>,
        radius_km: f64,
    ) -> Vec<Candidate<'c>> {
        catalog
            .all()
            .iter()
            .filter_map(|location| within(location, origin, radius_km))
            .collect()
    }
}

fn within(location: &Location, origin: Coord<f64>, radius_km: f64) -> Option<Candidate<'_>> {
    let distance_km = haversine_km(origin, location.position());
    (distance_km <= radius_km).then_some(Candidate {
        location,
        distance_km,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocationRecord;
    use rstest::{fixture, rstest};

    const COLOMBO: Coord<f64> = Coord {
        x: 79.8612,
        y: 6.9271,
    };

    #[fixture]
    fn catalog() -> LocationCatalog {
        LocationCatalog::load([
            LocationRecord::new("Galle Fort", [0.9, 0.1, 0.2, 0.8], true, 6.0311, 80.2170),
            LocationRecord::new("Lotus Tower", [0.1, 0.3, 0.1, 0.7], false, 6.9269, 79.8583),
            LocationRecord::new("Jaffna Fort", [0.9, 0.2, 0.3, 0.4], true, 9.6611, 80.0083),
        ])
        .expect("valid catalog")
    }

    #[rstest]
    fn returns_candidates_in_catalog_order(catalog: LocationCatalog) {
        let found = LinearScan.find_within(&catalog, COLOMBO, 150.0);
        let names: Vec<_> = found.iter().map(|c| c.location.name()).collect();
        assert_eq!(names, ["Galle Fort", "Lotus Tower"]);
    }

    #[rstest]
    fn radius_boundary_is_inclusive(catalog: LocationCatalog) {
        let fort = catalog.lookup("galle fort").expect("present");
        let exact = haversine_km(COLOMBO, fort.position());
        let found = LinearScan.find_within(&catalog, COLOMBO, exact);
        assert!(found.iter().any(|c| c.location.name() == "Galle Fort"));
    }

    #[rstest]
    fn zero_radius_only_matches_the_origin(catalog: LocationCatalog) {
        let tower = catalog.lookup("lotus tower").expect("present");
        let found = LinearScan.find_within(&catalog, tower.position(), 0.0);
        assert_eq!(found.len(), 1);
        assert_eq!(found.first().map(|c| c.distance_km), Some(0.0));
    }

    #[rstest]
    fn empty_result_is_not_an_error(catalog: LocationCatalog) {
        let middle_of_ocean = Coord { x: 60.0, y: -30.0 };
        assert!(LinearScan.find_within(&catalog, middle_of_ocean, 50.0).is_empty());
    }
}
