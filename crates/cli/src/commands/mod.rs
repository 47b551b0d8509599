//! CLI command implementations.
//!
//! Commands return their output as text; `main` prints it.

pub mod cart;
pub mod grid;

use std::path::{Path, PathBuf};

use legumechanics_core::{Catalog, CartStore, MoneyFormatter, ProductOrder};

use crate::error::CliError;
use crate::file_store::FileStore;

/// Everything a command needs: catalog, formatting, and the storage file.
pub struct Context {
    pub catalog: Catalog,
    pub money: MoneyFormatter,
    pub order: ProductOrder,
    pub store_path: PathBuf,
}

impl Context {
    /// Build a context, reading the catalog file when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be read or parsed.
    pub fn load(
        store_path: PathBuf,
        money: MoneyFormatter,
        order: ProductOrder,
        catalog_path: Option<&Path>,
    ) -> Result<Self, CliError> {
        let catalog = match catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| CliError::CatalogRead {
                    path: path.display().to_string(),
                    source,
                })?;
                Catalog::from_json(&json)?
            }
            None => Catalog::builtin(),
        };

        Ok(Self {
            catalog,
            money,
            order,
            store_path,
        })
    }

    /// Cart repository over the storage file.
    pub fn repo(&self) -> CartStore<FileStore> {
        CartStore::new(FileStore::new(&self.store_path))
    }
}
