//! Application state shared across handlers.

use std::sync::Arc;

use legumechanics_core::{Catalog, CatalogError, MoneyFormatter, ProductOrder};

use crate::config::StorefrontConfig;

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to read catalog {path}: {source}")]
    CatalogRead {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The catalog is loaded once
/// here and never changes afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
}

impl AppState {
    /// Create application state, loading the catalog named by the config.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured catalog file cannot be read or parsed.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path).map_err(|source| {
                    StateError::CatalogRead {
                        path: path.display().to_string(),
                        source,
                    }
                })?;
                let catalog = Catalog::from_json(&json)?;
                tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
                catalog
            }
            None => Catalog::builtin(),
        };

        Ok(Self::with_catalog(config, catalog))
    }

    /// Create application state around an already-built catalog.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn money(&self) -> &MoneyFormatter {
        &self.inner.config.money
    }

    #[must_use]
    pub fn product_order(&self) -> &ProductOrder {
        &self.inner.config.product_order
    }
}
