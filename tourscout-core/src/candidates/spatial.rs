//! R\*-tree backed candidate generation for large catalogs.
//!
//! The tree stores `[longitude, latitude]` points tagged with their catalog
//! slot. A query first collects entries inside a longitude/latitude envelope
//! that contains the whole search circle, then applies the exact haversine
//! test. The envelope is split in two when it crosses the antimeridian and
//! widened to every longitude when the circle reaches a pole.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use geo::Coord;
use rstar::primitives::GeomWithData;
use rstar::{AABB, RTree};

use super::{Candidate, CandidateGenerator, within};
use crate::{EARTH_RADIUS_KM, LocationCatalog};

/// Padding in degrees added to every envelope so rounding in the bound
/// computation never excludes a boundary point.
const ENVELOPE_MARGIN_DEG: f64 = 1e-4;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// Spatial index over one [`LocationCatalog`].
///
/// The index records catalog slots, so it must be queried with the catalog it
/// was built from. Slots missing from a different catalog are skipped.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourscout_core::{CandidateGenerator, LocationCatalog, LocationRecord, SpatialIndex};
///
/// # fn main() -> Result<(), tourscout_core::DataError> {
/// let catalog = LocationCatalog::load([
///     LocationRecord::new("Sigiriya Lion Rock", [1.0, 0.4, 0.5, 0.1], true, 7.9570, 80.7603),
/// ])?;
/// let index = SpatialIndex::build(&catalog);
/// let found = index.find_within(&catalog, Coord { x: 80.7633, y: 7.9636 }, 5.0);
/// assert_eq!(found.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct SpatialIndex {
    tree: RTree<IndexedPoint>,
}

impl fmt::Debug for SpatialIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialIndex")
            .field("entries", &self.tree.size())
            .finish_non_exhaustive()
    }
}

impl SpatialIndex {
    /// Bulk-load an index over every location in `catalog`.
    #[must_use]
    pub fn build(catalog: &LocationCatalog) -> Self {
        let points = catalog
            .all()
            .iter()
            .enumerate()
            .map(|(slot, location)| {
                let position = location.position();
                IndexedPoint::new([position.x, position.y], slot)
            })
            .collect();
        Self {
            tree: RTree::bulk_load(points),
        }
    }

    /// Number of indexed locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    fn slots_near(&self, origin: Coord<f64>, radius_km: f64) -> Vec<usize> {
        let mut slots: Vec<usize> = search_envelopes(origin, radius_km)
            .iter()
            .flat_map(|envelope| self.tree.locate_in_envelope(envelope))
            .map(|point| point.data)
            .collect();
        slots.sort_unstable();
        slots.dedup();
        slots
    }
}

impl CandidateGenerator for SpatialIndex {
    fn find_within<'c>(
        &self,
        catalog: &'c LocationCatalog,
        origin: Coord<f64>,
        radius_km: f64,
    ) -> Vec<Candidate<'c>> {
        if radius_km.is_nan() || radius_km < 0.0 {
            return Vec::new();
        }
        self.slots_near(origin, radius_km)
            .into_iter()
            .filter_map(|slot| catalog.all().get(slot))
            .filter_map(|location| within(location, origin, radius_km))
            .collect()
    }
}

/// Longitude/latitude envelopes jointly containing the spherical cap of
/// `radius_km` around `origin`.
#[expect(
    clippy::float_arithmetic,
    reason = "envelope bounds require spherical trigonometry"
)]
fn search_envelopes(origin: Coord<f64>, radius_km: f64) -> Vec<AABB<[f64; 2]>> {
    let angular = radius_km / EARTH_RADIUS_KM;
    let dlat = angular.to_degrees() + ENVELOPE_MARGIN_DEG;
    let min_lat = (origin.y - dlat).max(-90.0);
    let max_lat = (origin.y + dlat).min(90.0);

    let reaches_pole = min_lat <= -90.0 || max_lat >= 90.0 || angular >= FRAC_PI_2;
    let spread = angular.sin() / origin.y.to_radians().cos();
    if reaches_pole || spread.is_nan() || spread >= 1.0 {
        return vec![envelope(-180.0, min_lat, 180.0, max_lat)];
    }

    let dlng = spread.asin().to_degrees() + ENVELOPE_MARGIN_DEG;
    let min_lng = origin.x - dlng;
    let max_lng = origin.x + dlng;
    if min_lng < -180.0 {
        vec![
            envelope(min_lng + 360.0, min_lat, 180.0, max_lat),
            envelope(-180.0, min_lat, max_lng, max_lat),
        ]
    } else if max_lng > 180.0 {
        vec![
            envelope(min_lng, min_lat, 180.0, max_lat),
            envelope(-180.0, min_lat, max_lng - 360.0, max_lat),
        ]
    } else {
        vec![envelope(min_lng, min_lat, max_lng, max_lat)]
    }
}

fn envelope(min_lng: f64, min_lat: f64, max_lng: f64, max_lat: f64) -> AABB<[f64; 2]> {
    AABB::from_corners([min_lng, min_lat], [max_lng, max_lat])
}
