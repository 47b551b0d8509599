//! CLI error type.

use legumechanics_core::{CartStoreError, CatalogError};
use thiserror::Error;

/// Errors that end a CLI command with a non-zero exit.
#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog file could not be read.
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: String,
        source: std::io::Error,
    },

    /// Catalog file is not a valid catalog.
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Product id argument was blank.
    #[error("product id must not be empty")]
    EmptyProductId,

    /// The cart could not be saved.
    #[error(transparent)]
    CartStore(#[from] CartStoreError),
}
