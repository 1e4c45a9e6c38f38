//! JSON catalog loading.
//!
//! The payload is an array of [`LocationRecord`] objects. Decoding and
//! validation are separate steps so validation errors keep their record
//! position.

use std::io::Read;

use super::{CatalogLoadError, LocationCatalog, LocationRecord};

impl LocationCatalog {
    /// Decode and validate a JSON array of records from `reader`.
    ///
    /// # Errors
    /// Returns [`CatalogLoadError::Json`] for malformed JSON and
    /// [`CatalogLoadError::Invalid`] when a record fails validation.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogLoadError> {
        let records: Vec<LocationRecord> =
            serde_json::from_reader(reader).map_err(CatalogLoadError::Json)?;
        Ok(Self::load(records)?)
    }

    /// Decode and validate a JSON array of records held in memory.
    ///
    /// # Errors
    /// See [`LocationCatalog::from_json_reader`].
    pub fn from_json_str(payload: &str) -> Result<Self, CatalogLoadError> {
        Self::from_json_reader(payload.as_bytes())
    }
}
