//! Runtime settings: storage mode and available locales.
//!
//! Settings start from configuration and live for the lifetime of the
//! process.

use std::sync::Arc;

use multilingual_core::{Locale, LocaleSettings, StorageMode};
use tokio::sync::RwLock;

#[derive(Debug)]
struct Settings {
    storage_mode: StorageMode,
    locales: LocaleSettings,
}

/// Shared, mutable settings.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    inner: Arc<RwLock<Settings>>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(storage_mode: StorageMode, locales: LocaleSettings) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Settings {
                storage_mode,
                locales,
            })),
        }
    }

    pub async fn storage_mode(&self) -> StorageMode {
        self.inner.read().await.storage_mode
    }

    /// Switch storage mode.
    ///
    /// Metafields written in the previous mode are left untouched.
    pub async fn set_storage_mode(&self, mode: StorageMode) {
        let mut settings = self.inner.write().await;
        if settings.storage_mode != mode {
            tracing::info!(from = %settings.storage_mode, to = %mode, "Storage mode changed");
        }
        settings.storage_mode = mode;
    }

    pub async fn locales(&self) -> LocaleSettings {
        self.inner.read().await.locales.clone()
    }

    /// Add a locale, replacing any existing locale with the same code.
    pub async fn add_locale(&self, locale: Locale) -> LocaleSettings {
        let mut settings = self.inner.write().await;
        tracing::info!(code = %locale.code, label = %locale.label, "Locale saved");
        settings.locales.upsert(locale);
        settings.locales.clone()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use multilingual_core::LocaleCode;

    use super::*;

    fn store() -> SettingsStore {
        SettingsStore::new(StorageMode::Concise, LocaleSettings::default())
    }

    #[tokio::test]
    async fn storage_mode_round_trips() {
        let store = store();
        assert_eq!(store.storage_mode().await, StorageMode::Concise);

        store.set_storage_mode(StorageMode::Legacy).await;
        assert_eq!(store.storage_mode().await, StorageMode::Legacy);
    }

    #[tokio::test]
    async fn add_locale_replaces_same_code() {
        let store = store();
        let de = LocaleCode::parse("de").unwrap();

        store.add_locale(Locale::new(de.clone(), "Deutsch")).await;
        let locales = store.add_locale(Locale::new(de.clone(), "German")).await;

        let matching: Vec<_> = locales.available.iter().filter(|l| l.code == de).collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].label, "German");
        assert!(store.locales().await.contains(&de));
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = store();
        let clone = store.clone();
        clone.set_storage_mode(StorageMode::Legacy).await;
        assert_eq!(store.storage_mode().await, StorageMode::Legacy);
    }
}
