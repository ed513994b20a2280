//! Integration tests for the multilingual catalog editor.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p multilingual-integration-tests
//! ```
//!
//! The tests drive the translation service end to end against
//! [`MemoryBackend`], an in-memory stand-in for a store's product
//! metafields that enforces the same rules as the catalog API: values must
//! be non-empty and a namespace/key pair is unique per product.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use multilingual_admin::services::MetafieldBackend;
use multilingual_core::{Metafield, MetafieldId, MetafieldRecord, ProductId};
use thiserror::Error;

/// Errors returned by [`MemoryBackend`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("metafield {0} not found")]
    MetafieldNotFound(MetafieldId),
    #[error("metafield value must not be empty")]
    EmptyValue,
    #[error("metafield {namespace}.{key} already exists")]
    Duplicate { namespace: String, key: String },
    #[error("injected failure")]
    Injected,
}

#[derive(Default)]
struct Store {
    products: BTreeMap<ProductId, Vec<Metafield>>,
    next_id: i64,
    writes: usize,
    fail_on_write: Option<usize>,
}

/// In-memory product metafields.
#[derive(Default)]
pub struct MemoryBackend {
    store: Mutex<Store>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed a product with metafields; ids are assigned to those without one.
    pub fn seed(&self, product_id: ProductId, metafields: impl IntoIterator<Item = Metafield>) {
        let mut store = self.lock();
        let seeded: Vec<_> = metafields
            .into_iter()
            .map(|mut metafield| {
                if metafield.id.is_none() {
                    store.next_id += 1;
                    metafield.id = Some(MetafieldId::new(store.next_id));
                }
                metafield
            })
            .collect();
        store.products.entry(product_id).or_default().extend(seeded);
    }

    /// Make the next write attempted once `index` writes have succeeded
    /// fail with [`MemoryError::Injected`]. The failure fires once.
    pub fn fail_on_write(&self, index: usize) {
        self.lock().fail_on_write = Some(index);
    }

    /// Writes that succeeded so far.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    /// Current metafields of a product.
    #[must_use]
    pub fn metafields(&self, product_id: ProductId) -> Vec<Metafield> {
        self.lock()
            .products
            .get(&product_id)
            .cloned()
            .unwrap_or_default()
    }
}

impl Store {
    fn begin_write(&mut self) -> Result<(), MemoryError> {
        if self.fail_on_write == Some(self.writes) {
            self.fail_on_write = None;
            return Err(MemoryError::Injected);
        }
        Ok(())
    }

    fn find_mut(
        &mut self,
        product_id: ProductId,
        id: MetafieldId,
    ) -> Result<&mut Metafield, MemoryError> {
        self.products
            .get_mut(&product_id)
            .and_then(|metafields| metafields.iter_mut().find(|m| m.id == Some(id)))
            .ok_or(MemoryError::MetafieldNotFound(id))
    }
}

impl MetafieldBackend for MemoryBackend {
    type Error = MemoryError;

    async fn fetch_metafields(&self, product_id: ProductId) -> Result<Vec<Metafield>, MemoryError> {
        Ok(self.metafields(product_id))
    }

    async fn create_metafield(
        &self,
        product_id: ProductId,
        record: &MetafieldRecord,
    ) -> Result<Metafield, MemoryError> {
        let mut store = self.lock();
        store.begin_write()?;

        if record.value.is_empty() {
            return Err(MemoryError::EmptyValue);
        }
        let duplicate = store.products.get(&product_id).is_some_and(|metafields| {
            metafields
                .iter()
                .any(|m| m.namespace == record.namespace && m.key == record.key)
        });
        if duplicate {
            return Err(MemoryError::Duplicate {
                namespace: record.namespace.clone(),
                key: record.key.clone(),
            });
        }

        store.next_id += 1;
        let metafield = Metafield {
            id: Some(MetafieldId::new(store.next_id)),
            key: record.key.clone(),
            namespace: record.namespace.clone(),
            value: record.value.clone(),
            permission_set: record.permission_set,
        };
        store
            .products
            .entry(product_id)
            .or_default()
            .push(metafield.clone());
        store.writes += 1;
        Ok(metafield)
    }

    async fn update_metafield(
        &self,
        product_id: ProductId,
        id: MetafieldId,
        value: &str,
    ) -> Result<Metafield, MemoryError> {
        let mut store = self.lock();
        store.begin_write()?;

        if value.is_empty() {
            return Err(MemoryError::EmptyValue);
        }
        let metafield = store.find_mut(product_id, id)?;
        value.clone_into(&mut metafield.value);
        let updated = metafield.clone();
        store.writes += 1;
        Ok(updated)
    }

    async fn delete_metafield(&self, product_id: ProductId, id: MetafieldId) -> Result<(), MemoryError> {
        let mut store = self.lock();
        store.begin_write()?;

        store.find_mut(product_id, id)?;
        if let Some(metafields) = store.products.get_mut(&product_id) {
            metafields.retain(|m| m.id != Some(id));
        }
        store.writes += 1;
        Ok(())
    }
}
