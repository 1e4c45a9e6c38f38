//! CSV catalog loading.
//!
//! Accepts the metadata export layout (`Location_Name`, `l_hist`, `l_adv`,
//! `l_nat`, `l_rel`, `l_outdoor`, `l_lat`, `l_lng`) as well as the canonical
//! field names. Extra columns are ignored and empty cells count as missing.

use std::io::Read;

use super::{CatalogLoadError, LocationCatalog, LocationRecord};

impl LocationCatalog {
    /// Decode and validate CSV records, with a header row, from `reader`.
    ///
    /// # Errors
    /// Returns [`CatalogLoadError::Csv`] when a row cannot be read or
    /// decoded and [`CatalogLoadError::Invalid`] when a record fails
    /// validation.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogLoadError> {
        let mut csv_reader = ::csv::ReaderBuilder::new()
            .trim(::csv::Trim::All)
            .from_reader(reader);
        let records = csv_reader
            .deserialize::<LocationRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(CatalogLoadError::Csv)?;
        log::debug!("decoded {} CSV location rows", records.len());
        Ok(Self::load(records)?)
    }

    /// Decode and validate CSV records held in memory.
    ///
    /// # Errors
    /// See [`LocationCatalog::from_csv_reader`].
    pub fn from_csv_str(payload: &str) -> Result<Self, CatalogLoadError> {
        Self::from_csv_reader(payload.as_bytes())
    }
}
