//! Tourist locations.

use geo::Coord;
use thiserror::Error;

use crate::geodesy::{is_valid_latitude, is_valid_longitude};
use crate::{Interest, Interests};

/// A named destination rated against each interest axis.
///
/// Locations are immutable once built; the catalog hands out shared
/// references.
///
/// # Examples
/// ```
/// use tourscout_core::{Interests, Location};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fort = Location::new("Galle Fort", Interests::new(0.9, 0.1, 0.2, 0.8)?, true, 6.0311, 80.2170)?;
/// assert_eq!(fort.name(), "Galle Fort");
/// assert_eq!(fort.position().y, 6.0311);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    name: String,
    interests: Interests,
    outdoor: bool,
    position: Coord<f64>,
}

/// Errors returned by [`Location::new`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LocationError {
    /// The name was empty after trimming whitespace.
    #[error("location name must not be empty")]
    EmptyName,
    /// Latitude outside `[-90, 90]` or not finite.
    #[error("latitude {0} must be within -90..=90")]
    Latitude(f64),
    /// Longitude outside `[-180, 180]` or not finite.
    #[error("longitude {0} must be within -180..=180")]
    Longitude(f64),
}

impl Location {
    /// Validate and construct a location.
    ///
    /// Leading and trailing whitespace is stripped from `name`.
    ///
    /// # Errors
    /// Returns [`LocationError`] for an empty name or out-of-range
    /// coordinates.
    pub fn new(
        name: impl Into<String>,
        interests: Interests,
        outdoor: bool,
        lat: f64,
        lng: f64,
    ) -> Result<Self, LocationError> {
        let raw: String = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LocationError::EmptyName);
        }
        if !is_valid_latitude(lat) {
            return Err(LocationError::Latitude(lat));
        }
        if !is_valid_longitude(lng) {
            return Err(LocationError::Longitude(lng));
        }
        Ok(Self {
            name: trimmed.to_owned(),
            interests,
            outdoor,
            position: Coord { x: lng, y: lat },
        })
    }

    /// Display name as loaded.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Per-axis ratings.
    #[must_use]
    pub const fn interests(&self) -> &Interests {
        &self.interests
    }

    /// Rating for a single axis.
    #[must_use]
    pub const fn rating(&self, interest: Interest) -> f64 {
        self.interests.get(interest)
    }

    /// Whether the experience happens outdoors.
    #[must_use]
    pub const fn is_outdoor(&self) -> bool {
        self.outdoor
    }

    /// Position with `x = longitude`, `y = latitude`.
    #[must_use]
    pub const fn position(&self) -> Coord<f64> {
        self.position
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.position.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.position.x
    }
}
