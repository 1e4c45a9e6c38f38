//! Great-circle distance on a spherical Earth.
//!
//! Coordinates follow the `geo` convention: `x` is longitude and `y` is
//! latitude, both in degrees.

use geo::Coord;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinates in kilometres.
///
/// The intermediate term is clamped into `[0, 1]` so rounding near antipodal
/// points cannot push `asin` outside its domain.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourscout_core::haversine_km;
///
/// let colombo = Coord { x: 79.8612, y: 6.9271 };
/// assert_eq!(haversine_km(colombo, colombo), 0.0);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "haversine requires floating-point trigonometry"
)]
pub fn haversine_km(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let lat_a = a.y.to_radians();
    let lat_b = b.y.to_radians();
    let half_dlat = (b.y - a.y).to_radians() / 2.0;
    let half_dlng = (b.x - a.x).to_radians() / 2.0;

    let h = half_dlat.sin().powi(2) + lat_a.cos() * lat_b.cos() * half_dlng.sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Haversine distance taking latitude and longitude pairs in degrees.
///
/// # Examples
/// ```
/// use tourscout_core::distance_km;
///
/// let km = distance_km(6.9271, 79.8612, 6.0329, 80.2168);
/// assert!((106.5..=107.5).contains(&km));
/// ```
#[must_use]
pub fn distance_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    haversine_km(Coord { x: lng1, y: lat1 }, Coord { x: lng2, y: lat2 })
}

/// Whether `lat` is a finite latitude in `[-90, 90]`.
#[must_use]
pub fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat)
}

/// Whether `lng` is a finite longitude in `[-180, 180]`.
#[must_use]
pub fn is_valid_longitude(lng: f64) -> bool {
    (-180.0..=180.0).contains(&lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(6.9271, 79.8612)]
    #[case(-33.8688, 151.2093)]
    #[case(90.0, 0.0)]
    fn identical_points_are_zero_apart(#[case] lat: f64, #[case] lng: f64) {
        assert_eq!(distance_km(lat, lng, lat, lng), 0.0);
    }

    #[rstest]
    fn colombo_to_galle_is_about_107_km() {
        let km = distance_km(6.9271, 79.8612, 6.0329, 80.2168);
        assert!((106.5..=107.5).contains(&km), "unexpected distance {km}");
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "compare against half the circumference")]
    fn antipodal_points_stay_finite() {
        let km = distance_km(0.0, 0.0, 0.0, 180.0);
        assert!(km.is_finite());
        assert!((km - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[rstest]
    #[case(90.0, true)]
    #[case(-90.5, false)]
    #[case(f64::NAN, false)]
    fn latitude_bounds(#[case] lat: f64, #[case] valid: bool) {
        assert_eq!(is_valid_latitude(lat), valid);
    }

    #[rstest]
    #[case(-180.0, true)]
    #[case(180.01, false)]
    #[case(f64::INFINITY, false)]
    fn longitude_bounds(#[case] lng: f64, #[case] valid: bool) {
        assert_eq!(is_valid_longitude(lng), valid);
    }
}
