//! Saving a product translation.
//!
//! Reads the product's metafields, reconciles them against the submission
//! and applies the resulting writes one at a time. Writes are not
//! transactional: the first failure stops the run and the error reports how
//! many writes had already been applied.

use std::future::Future;

use multilingual_core::{
    LocaleCode, Metafield, MetafieldId, MetafieldRecord, ProductId, StorageMode,
    TranslatableField, TranslationSubmission, WriteIntent, reconcile,
};
use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use crate::bigcommerce::{BigCommerceClient, BigCommerceError};

/// Storage for a product's metafields.
pub trait MetafieldBackend: Send + Sync {
    /// Error returned by every operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// All metafields of a product.
    fn fetch_metafields(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Vec<Metafield>, Self::Error>> + Send;

    /// Create a metafield and return it with its assigned id.
    fn create_metafield(
        &self,
        product_id: ProductId,
        record: &MetafieldRecord,
    ) -> impl Future<Output = Result<Metafield, Self::Error>> + Send;

    /// Replace a metafield's value.
    fn update_metafield(
        &self,
        product_id: ProductId,
        id: MetafieldId,
        value: &str,
    ) -> impl Future<Output = Result<Metafield, Self::Error>> + Send;

    /// Remove a metafield.
    fn delete_metafield(
        &self,
        product_id: ProductId,
        id: MetafieldId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl MetafieldBackend for BigCommerceClient {
    type Error = BigCommerceError;

    fn fetch_metafields(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Vec<Metafield>, Self::Error>> + Send {
        self.get_metafields(product_id)
    }

    fn create_metafield(
        &self,
        product_id: ProductId,
        record: &MetafieldRecord,
    ) -> impl Future<Output = Result<Metafield, Self::Error>> + Send {
        Self::create_metafield(self, product_id, record)
    }

    fn update_metafield(
        &self,
        product_id: ProductId,
        id: MetafieldId,
        value: &str,
    ) -> impl Future<Output = Result<Metafield, Self::Error>> + Send {
        Self::update_metafield(self, product_id, id, value)
    }

    fn delete_metafield(
        &self,
        product_id: ProductId,
        id: MetafieldId,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send {
        Self::delete_metafield(self, product_id, id)
    }
}

/// A write failed part way through a save.
#[derive(Debug, Error)]
#[error("write {} of {total} failed ({applied} applied): {source}", .applied + 1)]
pub struct ApplyError<E: std::error::Error + 'static> {
    /// Writes that succeeded before the failure.
    pub applied: usize,
    /// Writes the save intended to make.
    pub total: usize,
    /// The write that failed.
    pub intent: WriteIntent,
    #[source]
    pub source: E,
}

/// Error saving a translation.
#[derive(Debug, Error)]
pub enum TranslationError<E: std::error::Error + 'static> {
    /// Reading the current metafields failed; nothing was written.
    #[error("failed to fetch metafields: {0}")]
    Fetch(#[source] E),

    /// A write failed; earlier writes remain applied.
    #[error(transparent)]
    Apply(ApplyError<E>),
}

impl<E: std::error::Error + 'static> TranslationError<E> {
    /// The backend error behind this failure.
    pub const fn backend_error(&self) -> &E {
        match self {
            Self::Fetch(e) | Self::Apply(ApplyError { source: e, .. }) => e,
        }
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedTranslation {
    /// The writes that were made, in order.
    pub intents: Vec<WriteIntent>,
    /// Metafields returned by create and update writes.
    pub metafields: Vec<Metafield>,
}

/// Persist `submission` as the `locale` translation of a product.
///
/// # Errors
///
/// Returns `TranslationError::Fetch` if the existing metafields cannot be
/// read, or `TranslationError::Apply` at the first write that fails.
#[instrument(skip(backend, fields, submission), fields(product_id = %product_id, locale = %locale, mode = %mode))]
pub async fn save_translation<B: MetafieldBackend>(
    backend: &B,
    product_id: ProductId,
    mode: StorageMode,
    locale: &LocaleCode,
    default_locale: &LocaleCode,
    fields: &[TranslatableField],
    submission: &TranslationSubmission,
) -> Result<AppliedTranslation, TranslationError<B::Error>> {
    let existing = backend
        .fetch_metafields(product_id)
        .await
        .map_err(TranslationError::Fetch)?;

    let intents = reconcile(&existing, mode, locale, default_locale, fields, submission);
    let total = intents.len();
    let mut metafields = Vec::with_capacity(total);

    for (applied, intent) in intents.iter().enumerate() {
        let result = match intent {
            WriteIntent::Create(record) => {
                tracing::info!(key = %record.key, namespace = %record.namespace, "Creating metafield");
                backend
                    .create_metafield(product_id, record)
                    .await
                    .map(Some)
            }
            WriteIntent::Update { id, value } => {
                tracing::info!(metafield_id = %id, "Updating metafield");
                backend
                    .update_metafield(product_id, *id, value)
                    .await
                    .map(Some)
            }
            WriteIntent::Delete { id } => {
                tracing::info!(metafield_id = %id, "Deleting metafield");
                backend.delete_metafield(product_id, *id).await.map(|()| None)
            }
        };

        match result {
            Ok(metafield) => metafields.extend(metafield),
            Err(source) => {
                tracing::warn!(applied, total, error = %source, "Translation write failed");
                return Err(TranslationError::Apply(ApplyError {
                    applied,
                    total,
                    intent: intent.clone(),
                    source,
                }));
            }
        }
    }

    tracing::info!(writes = total, "Translation saved");
    Ok(AppliedTranslation {
        intents,
        metafields,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use multilingual_core::{PermissionSet, default_translatable_fields};

    use super::*;

    #[derive(Debug, Error)]
    #[error("backend unavailable")]
    struct Unavailable;

    /// Records write calls; `fail_on_call` fails the write with that index.
    #[derive(Default)]
    struct Recorder {
        existing: Vec<Metafield>,
        fail_fetch: bool,
        fail_on_call: Option<usize>,
        calls: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn call(&self, name: String) -> Result<(), Unavailable> {
            let mut calls = self.calls.lock().unwrap();
            if self.fail_on_call == Some(calls.len()) {
                return Err(Unavailable);
            }
            calls.push(name);
            Ok(())
        }
    }

    impl MetafieldBackend for Recorder {
        type Error = Unavailable;

        async fn fetch_metafields(&self, _: ProductId) -> Result<Vec<Metafield>, Unavailable> {
            if self.fail_fetch {
                return Err(Unavailable);
            }
            Ok(self.existing.clone())
        }

        async fn create_metafield(
            &self,
            _: ProductId,
            record: &MetafieldRecord,
        ) -> Result<Metafield, Unavailable> {
            self.call(format!("create {}", record.key))?;
            Ok(Metafield {
                id: Some(MetafieldId::new(100)),
                key: record.key.clone(),
                namespace: record.namespace.clone(),
                value: record.value.clone(),
                permission_set: record.permission_set,
            })
        }

        async fn update_metafield(
            &self,
            _: ProductId,
            id: MetafieldId,
            value: &str,
        ) -> Result<Metafield, Unavailable> {
            self.call(format!("update {id}"))?;
            Ok(Metafield {
                id: Some(id),
                key: String::new(),
                namespace: String::new(),
                value: value.to_owned(),
                permission_set: PermissionSet::WriteAndSfAccess,
            })
        }

        async fn delete_metafield(&self, _: ProductId, id: MetafieldId) -> Result<(), Unavailable> {
            self.call(format!("delete {id}"))
        }
    }

    fn locale(code: &str) -> LocaleCode {
        LocaleCode::parse(code).unwrap()
    }

    fn spanish_name(id: i64) -> Metafield {
        Metafield {
            id: Some(MetafieldId::new(id)),
            key: "name".to_owned(),
            namespace: "es".to_owned(),
            value: "Producto".to_owned(),
            permission_set: PermissionSet::WriteAndSfAccess,
        }
    }

    async fn save(
        backend: &Recorder,
        submission: &TranslationSubmission,
    ) -> Result<AppliedTranslation, TranslationError<Unavailable>> {
        save_translation(
            backend,
            ProductId::new(111),
            StorageMode::Legacy,
            &locale("es"),
            &locale("en"),
            &default_translatable_fields(),
            submission,
        )
        .await
    }

    #[tokio::test]
    async fn applies_every_legacy_intent_in_order() {
        let backend = Recorder {
            existing: vec![spanish_name(7)],
            ..Recorder::default()
        };
        let submission = TranslationSubmission::new()
            .with("name", "")
            .with("description", "Una descripción")
            .with("page_title", "Título");

        let applied = save(&backend, &submission).await.unwrap();

        assert_eq!(
            *backend.calls.lock().unwrap(),
            ["delete 7", "create description", "create page_title"]
        );
        assert_eq!(applied.intents.len(), 3);
        assert_eq!(applied.metafields.len(), 2);
    }

    #[tokio::test]
    async fn stops_at_first_failed_write() {
        let backend = Recorder {
            existing: vec![spanish_name(7)],
            fail_on_call: Some(1),
            ..Recorder::default()
        };
        let submission = TranslationSubmission::new()
            .with("name", "Nuevo")
            .with("description", "Una descripción")
            .with("page_title", "Título");

        let err = save(&backend, &submission).await.unwrap_err();

        let TranslationError::Apply(apply) = err else {
            panic!("expected an apply error");
        };
        assert_eq!(apply.applied, 1);
        assert_eq!(apply.total, 3);
        assert!(matches!(apply.intent, WriteIntent::Create(ref r) if r.key == "description"));
        assert_eq!(*backend.calls.lock().unwrap(), ["update 7"]);
    }

    #[tokio::test]
    async fn fetch_failure_writes_nothing() {
        let backend = Recorder {
            fail_fetch: true,
            ..Recorder::default()
        };
        let submission = TranslationSubmission::new().with("name", "Producto");

        let err = save(&backend, &submission).await.unwrap_err();

        assert!(matches!(err, TranslationError::Fetch(Unavailable)));
        assert!(backend.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn apply_error_message_counts_writes() {
        let err = ApplyError {
            applied: 2,
            total: 4,
            intent: WriteIntent::Delete {
                id: MetafieldId::new(9),
            },
            source: Unavailable,
        };
        assert_eq!(
            err.to_string(),
            "write 3 of 4 failed (2 applied): backend unavailable"
        );
    }
}
