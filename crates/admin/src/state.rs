//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    catalog::{CatalogClient, CatalogError},
    config::AdminConfig,
};

/// Application state shared across all handlers.
///
/// Holds no product data; every request reads the catalog afresh.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogClient,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the catalog HTTP client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, CatalogError> {
        let catalog = CatalogClient::new(&config.catalog)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, catalog }),
        })
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}
