//! Application state shared across handlers.

use std::sync::Arc;

use multilingual_core::{TranslatableField, default_translatable_fields};

use crate::bigcommerce::{BigCommerceClient, BigCommerceError};
use crate::config::AdminConfig;
use crate::services::SettingsStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the BigCommerce client, configuration and runtime settings.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    bigcommerce: BigCommerceClient,
    settings: SettingsStore,
    fields: Vec<TranslatableField>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the BigCommerce base URL cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, BigCommerceError> {
        let bigcommerce = BigCommerceClient::new(&config.bigcommerce)?;
        let settings = SettingsStore::new(config.storage_mode, config.locales.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                bigcommerce,
                settings,
                fields: default_translatable_fields(),
            }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the BigCommerce API client.
    #[must_use]
    pub fn bigcommerce(&self) -> &BigCommerceClient {
        &self.inner.bigcommerce
    }

    /// Get a reference to the runtime settings.
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.inner.settings
    }

    /// The product fields offered for translation.
    #[must_use]
    pub fn translatable_fields(&self) -> &[TranslatableField] {
        &self.inner.fields
    }
}
