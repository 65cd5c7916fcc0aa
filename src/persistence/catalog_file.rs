//! Loading the city catalog from disk.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::core::CityCatalog;
use crate::error::DataFormatError;

/// Read and validate a JSON catalog file.
///
/// A missing or malformed file is fatal for the game; the caller reports it
/// and exits.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<CityCatalog, DataFormatError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataFormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = CityCatalog::from_json_str(&text)?;
    info!(path = %path.display(), cities = catalog.len(), "catalog loaded");
    Ok(catalog)
}
