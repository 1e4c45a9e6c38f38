//! Search origins.
//!
//! A request names its origin either by catalog location or by raw
//! coordinates. [`OriginSpec`] mirrors the optional request fields and
//! converts into a [`SearchOrigin`] carrying exactly one of the two forms.

use geo::Coord;

use crate::geodesy::{is_valid_latitude, is_valid_longitude};
use crate::{InvalidRequestError, Location};

/// Optional origin fields as supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OriginSpec {
    /// Name of a catalog location.
    pub target_location: Option<String>,
    /// Latitude of the caller's position.
    pub current_lat: Option<f64>,
    /// Longitude of the caller's position.
    pub current_lng: Option<f64>,
}

/// Where a recommendation search starts.
///
/// # Examples
/// ```
/// use tourscout_core::{InvalidRequestError, OriginSpec, SearchOrigin};
///
/// let by_name = OriginSpec { target_location: Some(" Galle Fort ".into()), ..OriginSpec::default() };
/// assert_eq!(SearchOrigin::try_from(by_name), Ok(SearchOrigin::Named("Galle Fort".into())));
///
/// let both = OriginSpec {
///     target_location: Some("Galle Fort".into()),
///     current_lat: Some(6.9),
///     current_lng: Some(79.8),
/// };
/// assert_eq!(SearchOrigin::try_from(both), Err(InvalidRequestError::AmbiguousOrigin));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOrigin {
    /// A catalog location, looked up case-insensitively.
    Named(String),
    /// A validated position with `x = longitude`, `y = latitude`.
    Coordinates(Coord<f64>),
}

impl SearchOrigin {
    /// Validate a named origin.
    ///
    /// # Errors
    /// Returns [`InvalidRequestError::EmptyLocationName`] for a blank name.
    pub fn named(name: &str) -> Result<Self, InvalidRequestError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(InvalidRequestError::EmptyLocationName);
        }
        Ok(Self::Named(trimmed.to_owned()))
    }

    /// Validate a coordinate origin.
    ///
    /// # Errors
    /// Returns [`InvalidRequestError::Latitude`] or
    /// [`InvalidRequestError::Longitude`] for out-of-range values.
    pub fn coordinates(lat: f64, lng: f64) -> Result<Self, InvalidRequestError> {
        if !is_valid_latitude(lat) {
            return Err(InvalidRequestError::Latitude(lat));
        }
        if !is_valid_longitude(lng) {
            return Err(InvalidRequestError::Longitude(lng));
        }
        Ok(Self::Coordinates(Coord { x: lng, y: lat }))
    }
}

impl TryFrom<OriginSpec> for SearchOrigin {
    type Error = InvalidRequestError;

    fn try_from(spec: OriginSpec) -> Result<Self, Self::Error> {
        match (spec.target_location, spec.current_lat, spec.current_lng) {
            (Some(name), None, None) => Self::named(&name),
            (None, Some(lat), Some(lng)) => Self::coordinates(lat, lng),
            (Some(_), _, _) => Err(InvalidRequestError::AmbiguousOrigin),
            (None, None, None) => Err(InvalidRequestError::MissingOrigin),
            (None, _, _) => Err(InvalidRequestError::IncompleteCoordinates),
        }
    }
}

/// An origin after catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedOrigin<'a> {
    /// A catalog location.
    Location(&'a Location),
    /// Raw coordinates.
    Coordinates(Coord<f64>),
}

impl ResolvedOrigin<'_> {
    /// Position to measure distances from.
    #[must_use]
    pub const fn position(&self) -> Coord<f64> {
        match self {
            Self::Location(location) => location.position(),
            Self::Coordinates(position) => *position,
        }
    }

    /// Location name when the origin is a catalog entry.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Location(location) => Some(location.name()),
            Self::Coordinates(_) => None,
        }
    }
}
