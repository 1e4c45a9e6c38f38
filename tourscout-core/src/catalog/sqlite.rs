//! `SQLite`-backed catalog loading.
//!
//! Reads the `locations` table through a read-only connection. Rows are
//! consumed in `rowid` order so the catalog's presentation order matches
//! insertion order.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, Row};

use super::{CatalogLoadError, LocationCatalog, LocationRecord, OutdoorFlag};

const SELECT_LOCATIONS: &str =
    "SELECT name, hist, adv, nat, rel, outdoor, lat, lng FROM locations ORDER BY rowid";

impl LocationCatalog {
    /// Load the catalog from the `locations` table of a `SQLite` database.
    ///
    /// `NULL` columns are reported as missing fields.
    ///
    /// # Errors
    /// Returns [`CatalogLoadError::OpenDatabase`] when the file cannot be
    /// opened, [`CatalogLoadError::Database`] for query failures, and
    /// [`CatalogLoadError::Invalid`] for rows that fail validation.
    pub fn open_sqlite<P: AsRef<Path>>(path: P) -> Result<Self, CatalogLoadError> {
        let database_path = path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| CatalogLoadError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;
        let records = read_records(&connection).map_err(CatalogLoadError::Database)?;
        Ok(Self::load(records)?)
    }
}

fn read_records(connection: &Connection) -> rusqlite::Result<Vec<LocationRecord>> {
    let mut statement = connection.prepare(SELECT_LOCATIONS)?;
    let rows = statement.query_map([], record_from_row)?;
    rows.collect()
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<LocationRecord> {
    let outdoor: Option<i64> = row.get(5)?;
    Ok(LocationRecord {
        name: row.get(0)?,
        hist: row.get(1)?,
        adv: row.get(2)?,
        nat: row.get(3)?,
        rel: row.get(4)?,
        outdoor: outdoor.map(OutdoorFlag::Integer),
        lat: row.get(6)?,
        lng: row.get(7)?,
    })
}
