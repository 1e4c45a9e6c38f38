//! Immutable location catalog with case-insensitive name lookup.
//!
//! The catalog is built once at startup from raw [`LocationRecord`]s and is
//! never mutated afterwards, so request handlers can share it behind an `Arc`
//! and read it concurrently without locking.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;

use crate::{InterestError, Interests, Location, LocationError};

#[cfg(feature = "store-csv")]
mod csv;
#[cfg(feature = "serde")]
mod json;
#[cfg(feature = "store-sqlite")]
mod sqlite;

/// Errors raised while validating catalog records.
///
/// `row` is the zero-based position of the offending record in its source.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DataError {
    /// A required attribute was absent.
    #[error("record {row}: missing field `{field}`")]
    MissingField {
        /// Position of the record.
        row: usize,
        /// Name of the absent attribute.
        field: &'static str,
    },
    /// An attribute was not finite or fell outside its valid range.
    #[error("record {row}: field `{field}` value {value} is out of range")]
    OutOfRange {
        /// Position of the record.
        row: usize,
        /// Name of the invalid attribute.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// The outdoor flag was an integer other than `0` or `1`.
    #[error("record {row}: outdoor flag {value} must be 0 or 1")]
    InvalidFlag {
        /// Position of the record.
        row: usize,
        /// Rejected value.
        value: i64,
    },
    /// The name was empty after trimming.
    #[error("record {row}: location name is empty")]
    EmptyName {
        /// Position of the record.
        row: usize,
    },
    /// Two records normalise to the same name.
    #[error("record {row}: duplicate location name {name:?} (first seen in record {first})")]
    DuplicateName {
        /// Position of the duplicate.
        row: usize,
        /// Name as written in the duplicate record.
        name: String,
        /// Position of the earlier record with the same key.
        first: usize,
    },
}

/// Errors raised while reading a catalog from a bulk source.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// A record failed validation.
    #[error(transparent)]
    Invalid(#[from] DataError),
    /// The JSON payload could not be decoded.
    #[cfg(feature = "serde")]
    #[error("failed to decode location records: {0}")]
    Json(#[source] serde_json::Error),
    /// The CSV payload could not be read or decoded.
    #[cfg(feature = "store-csv")]
    #[error("failed to decode location CSV: {0}")]
    Csv(#[source] ::csv::Error),
    /// Opening the `SQLite` database failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to open SQLite catalog at {path}: {source}")]
    OpenDatabase {
        /// Location of the database on disk.
        path: std::path::PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Reading rows from `SQLite` failed.
    #[cfg(feature = "store-sqlite")]
    #[error("failed to read SQLite catalog: {0}")]
    Database(#[source] rusqlite::Error),
}

/// Outdoor marker as found in source data: a boolean or a 0/1 integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum OutdoorFlag {
    /// Native boolean.
    Bool(bool),
    /// Integer flag; only `0` and `1` are valid.
    Integer(i64),
}

impl From<bool> for OutdoorFlag {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One unvalidated catalog row.
///
/// Every attribute is optional so that a missing field is reported as a
/// [`DataError::MissingField`] with its position, rather than as an opaque
/// decoding failure. The serde representation also accepts the column names
/// used by the metadata CSV exports (`Location_Name`, `l_hist`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct LocationRecord {
    /// Display name; unique after trimming and lowercasing.
    #[cfg_attr(feature = "serde", serde(default, alias = "Location_Name"))]
    pub name: Option<String>,
    /// Historical rating.
    #[cfg_attr(feature = "serde", serde(default, alias = "l_hist"))]
    pub hist: Option<f64>,
    /// Adventure rating.
    #[cfg_attr(feature = "serde", serde(default, alias = "l_adv"))]
    pub adv: Option<f64>,
    /// Nature rating.
    #[cfg_attr(feature = "serde", serde(default, alias = "l_nat"))]
    pub nat: Option<f64>,
    /// Relaxation rating.
    #[cfg_attr(feature = "serde", serde(default, alias = "l_rel"))]
    pub rel: Option<f64>,
    /// Outdoor marker.
    #[cfg_attr(feature = "serde", serde(default, alias = "l_outdoor"))]
    pub outdoor: Option<OutdoorFlag>,
    /// Latitude in degrees.
    #[cfg_attr(feature = "serde", serde(default, alias = "l_lat"))]
    pub lat: Option<f64>,
    /// Longitude in degrees.
    #[cfg_attr(feature = "serde", serde(default, alias = "l_lng"))]
    pub lng: Option<f64>,
}

impl LocationRecord {
    /// Build a fully populated record.
    ///
    /// `ratings` is in `hist, adv, nat, rel` order.
    #[must_use]
    pub fn new(name: &str, ratings: [f64; 4], outdoor: bool, lat: f64, lng: f64) -> Self {
        let [hist, adv, nat, rel] = ratings;
        Self {
            name: Some(name.to_owned()),
            hist: Some(hist),
            adv: Some(adv),
            nat: Some(nat),
            rel: Some(rel),
            outdoor: Some(OutdoorFlag::Bool(outdoor)),
            lat: Some(lat),
            lng: Some(lng),
        }
    }

    /// Build a record describing an existing location.
    #[must_use]
    pub fn from_location(location: &Location) -> Self {
        Self::new(
            location.name(),
            location.interests().as_array(),
            location.is_outdoor(),
            location.latitude(),
            location.longitude(),
        )
    }

    /// Validate the record found at position `row`.
    ///
    /// # Errors
    /// Returns [`DataError`] naming the first missing or invalid attribute.
    pub fn validate(self, row: usize) -> Result<Location, DataError> {
        let name = require(self.name, row, "name")?;
        if name.trim().is_empty() {
            return Err(DataError::EmptyName { row });
        }
        let hist = require(self.hist, row, "hist")?;
        let adv = require(self.adv, row, "adv")?;
        let nat = require(self.nat, row, "nat")?;
        let rel = require(self.rel, row, "rel")?;
        let outdoor = flag(require(self.outdoor, row, "outdoor")?, row)?;
        let lat = require(self.lat, row, "lat")?;
        let lng = require(self.lng, row, "lng")?;

        let interests = Interests::new(hist, adv, nat, rel).map_err(
            |InterestError::OutOfRange { interest, value }| DataError::OutOfRange {
                row,
                field: interest.as_str(),
                value,
            },
        )?;
        Location::new(name, interests, outdoor, lat, lng).map_err(|err| match err {
            LocationError::Latitude(value) => DataError::OutOfRange {
                row,
                field: "lat",
                value,
            },
            LocationError::Longitude(value) => DataError::OutOfRange {
                row,
                field: "lng",
                value,
            },
            LocationError::EmptyName => DataError::EmptyName { row },
        })
    }
}

fn require<T>(value: Option<T>, row: usize, field: &'static str) -> Result<T, DataError> {
    value.ok_or(DataError::MissingField { row, field })
}

fn flag(value: OutdoorFlag, row: usize) -> Result<bool, DataError> {
    match value {
        OutdoorFlag::Bool(outdoor) => Ok(outdoor),
        OutdoorFlag::Integer(0) => Ok(false),
        OutdoorFlag::Integer(1) => Ok(true),
        OutdoorFlag::Integer(value) => Err(DataError::InvalidFlag { row, value }),
    }
}

/// Lowercased, whitespace-trimmed lookup key for a location name.
///
/// # Examples
/// ```
/// use tourscout_core::catalog::normalise_name;
///
/// assert_eq!(normalise_name("  Galle FORT "), "galle fort");
/// ```
#[must_use]
pub fn normalise_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Read-only collection of locations.
///
/// # Examples
/// ```
/// use tourscout_core::{LocationCatalog, LocationRecord};
///
/// # fn main() -> Result<(), tourscout_core::DataError> {
/// let catalog = LocationCatalog::load([
///     LocationRecord::new("Lotus Tower", [0.1, 0.3, 0.1, 0.7], false, 6.9269, 79.8583),
/// ])?;
/// assert!(catalog.lookup("  lotus tower").is_some());
/// assert!(catalog.lookup("Atlantis").is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocationCatalog {
    locations: Vec<Location>,
    index: HashMap<String, usize>,
}

impl LocationCatalog {
    /// Validate `records` and build the catalog with its name index.
    ///
    /// # Errors
    /// Returns the first [`DataError`] encountered. Duplicate names are
    /// rejected because the name is the catalog key.
    pub fn load<I>(records: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = LocationRecord>,
    {
        let mut catalog = Self::default();
        for (row, record) in records.into_iter().enumerate() {
            let location = record.validate(row)?;
            catalog.insert(row, location)?;
        }
        log::debug!("loaded {} locations into catalog", catalog.len());
        Ok(catalog)
    }

    /// Build a catalog from already validated locations.
    ///
    /// # Errors
    /// Returns [`DataError::DuplicateName`] when two names collide.
    pub fn from_locations<I>(locations: I) -> Result<Self, DataError>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut catalog = Self::default();
        for (row, location) in locations.into_iter().enumerate() {
            catalog.insert(row, location)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, row: usize, location: Location) -> Result<(), DataError> {
        match self.index.entry(normalise_name(location.name())) {
            Entry::Occupied(existing) => Err(DataError::DuplicateName {
                row,
                name: location.name().to_owned(),
                first: *existing.get(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(self.locations.len());
                self.locations.push(location);
                Ok(())
            }
        }
    }

    /// Find a location by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Location> {
        self.index
            .get(&normalise_name(name))
            .and_then(|slot| self.locations.get(*slot))
    }

    /// Every location in load order.
    #[must_use]
    pub fn all(&self) -> &[Location] {
        &self.locations
    }

    /// Number of locations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    /// Whether the catalog holds no locations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
