//! Test-only catalog fixtures and oracle doubles used by unit and behaviour
//! tests across the workspace.

use std::time::Duration;

use crate::{DataError, FeatureVector, LocationCatalog, LocationRecord, OracleError, ScoringOracle};

/// A slice of real Sri Lankan destinations spread across several regions.
///
/// Colombo entries sit within a few kilometres of each other, Galle and the
/// southern coast lie roughly 100-150 km south, and the northern entries are
/// several hundred kilometres away.
pub const SAMPLE_LOCATIONS: &[(&str, [f64; 4], bool, f64, f64)] = &[
    ("Gangaramaya Temple", [0.8, 0.0, 0.1, 0.5], false, 6.9169, 79.8550),
    ("Lotus Tower", [0.1, 0.3, 0.1, 0.7], false, 6.9269, 79.8583),
    ("Galle Face Green", [0.3, 0.1, 0.1, 0.8], true, 6.9269, 79.8433),
    ("Independence Square", [0.7, 0.0, 0.2, 0.6], true, 6.9039, 79.8678),
    ("Mount Lavinia Beach", [0.2, 0.1, 0.4, 0.8], true, 6.8333, 79.8667),
    ("Galle Fort", [0.9, 0.1, 0.2, 0.8], true, 6.0311, 80.2170),
    ("Unawatuna Jungle Beach", [0.1, 0.5, 0.7, 0.8], true, 6.0183, 80.2525),
    ("Mirissa Whale Watching", [0.0, 0.8, 0.9, 0.3], true, 5.9483, 80.4714),
    ("Sigiriya Lion Rock", [1.0, 0.4, 0.5, 0.1], true, 7.9570, 80.7603),
    ("Temple of the Tooth", [1.0, 0.1, 0.2, 0.6], false, 7.2936, 80.6413),
    ("Ella Rock Hike", [0.1, 0.9, 0.8, 0.1], true, 6.8585, 81.0505),
    ("Jaffna Fort", [0.9, 0.2, 0.3, 0.4], true, 9.6611, 80.0083),
];

/// Records for [`SAMPLE_LOCATIONS`].
#[must_use]
pub fn sample_records() -> Vec<LocationRecord> {
    SAMPLE_LOCATIONS
        .iter()
        .map(|(name, ratings, outdoor, lat, lng)| {
            LocationRecord::new(name, *ratings, *outdoor, *lat, *lng)
        })
        .collect()
}

/// Catalog built from [`SAMPLE_LOCATIONS`].
///
/// # Errors
/// Propagates validation failures; the fixture data is valid, so callers may
/// treat an error as a test bug.
pub fn sample_catalog() -> Result<LocationCatalog, DataError> {
    LocationCatalog::load(sample_records())
}

/// Oracle returning the same raw value for every input.
#[derive(Debug, Clone, Copy)]
pub struct FixedOracle(pub f64);

impl ScoringOracle for FixedOracle {
    fn score(&self, _features: &FeatureVector) -> Result<f64, OracleError> {
        Ok(self.0)
    }
}

/// Oracle delegating to a closure.
pub struct FnOracle<F> {
    scorer: F,
}

impl<F> FnOracle<F>
where
    F: Fn(&FeatureVector) -> Result<f64, OracleError> + Send + Sync,
{
    /// Wrap `scorer`.
    pub const fn new(scorer: F) -> Self {
        Self { scorer }
    }
}

impl<F> ScoringOracle for FnOracle<F>
where
    F: Fn(&FeatureVector) -> Result<f64, OracleError> + Send + Sync,
{
    fn score(&self, features: &FeatureVector) -> Result<f64, OracleError> {
        (self.scorer)(features)
    }
}

/// Oracle that blocks for `delay` before answering.
#[derive(Debug, Clone, Copy)]
pub struct SlowOracle {
    /// Time spent in each call.
    pub delay: Duration,
    /// Raw value returned after the delay.
    pub value: f64,
}

impl ScoringOracle for SlowOracle {
    fn score(&self, _features: &FeatureVector) -> Result<f64, OracleError> {
        std::thread::sleep(self.delay);
        Ok(self.value)
    }
}

/// Oracle reporting that no model is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnreadyOracle;

impl ScoringOracle for UnreadyOracle {
    fn score(&self, _features: &FeatureVector) -> Result<f64, OracleError> {
        Err(OracleError::NotReady)
    }

    fn is_ready(&self) -> bool {
        false
    }
}

/// Persist `locations` into a fresh `SQLite` `locations` table at `path`.
///
/// # Errors
/// Returns any `rusqlite` failure raised while creating or filling the table.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_catalog(
    path: &std::path::Path,
    locations: &[crate::Location],
) -> rusqlite::Result<()> {
    let mut connection = rusqlite::Connection::open(path)?;
    connection.execute_batch(
        "CREATE TABLE locations (
            name TEXT NOT NULL,
            hist REAL, adv REAL, nat REAL, rel REAL,
            outdoor INTEGER,
            lat REAL, lng REAL
        );",
    )?;
    let transaction = connection.transaction()?;
    {
        let mut insert = transaction.prepare(
            "INSERT INTO locations (name, hist, adv, nat, rel, outdoor, lat, lng)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for location in locations {
            let [hist, adv, nat, rel] = location.interests().as_array();
            insert.execute(rusqlite::params![
                location.name(),
                hist,
                adv,
                nat,
                rel,
                i64::from(location.is_outdoor()),
                location.latitude(),
                location.longitude(),
            ])?;
        }
    }
    transaction.commit()
}
