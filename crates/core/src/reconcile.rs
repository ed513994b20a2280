//! Translation edits → metafield write intents.
//!
//! [`reconcile`] compares a product's current metafields with the values a
//! merchant submitted for one locale and describes the writes needed to
//! persist them. It performs no I/O; callers apply the intents in order.
//!
//! Two rules hold in both storage modes:
//! - an empty value never creates a metafield;
//! - translations for other locales are never dropped.

use serde::{Deserialize, Serialize};

use crate::concise::ConciseBlob;
use crate::types::{
    LocaleCode, Metafield, MetafieldId, MetafieldRecord, StorageMode, TranslatableField,
    TranslationSubmission,
};

/// A single write against the product's metafields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WriteIntent {
    /// Create a new metafield.
    Create(MetafieldRecord),
    /// Replace the value of an existing metafield.
    Update { id: MetafieldId, value: String },
    /// Remove an existing metafield.
    Delete { id: MetafieldId },
}

impl WriteIntent {
    /// The metafield this intent targets, `None` for creates.
    #[must_use]
    pub const fn target(&self) -> Option<MetafieldId> {
        match self {
            Self::Create(_) => None,
            Self::Update { id, .. } | Self::Delete { id } => Some(*id),
        }
    }
}

/// Compute the writes that persist `submission` as the `locale` translation.
///
/// `locale` must not be `default_locale`: default-locale edits update the
/// product's own fields instead. Fields missing from `submission` are
/// treated as empty.
///
/// - [`StorageMode::Legacy`] yields at most one intent per field.
/// - [`StorageMode::Concise`] yields exactly one intent, creating or
///   updating the product's blob.
#[must_use]
pub fn reconcile(
    existing: &[Metafield],
    mode: StorageMode,
    locale: &LocaleCode,
    default_locale: &LocaleCode,
    fields: &[TranslatableField],
    submission: &TranslationSubmission,
) -> Vec<WriteIntent> {
    debug_assert_ne!(
        locale, default_locale,
        "default locale edits update the product, not its metafields"
    );

    match mode {
        StorageMode::Legacy => reconcile_legacy(existing, locale, fields, submission),
        StorageMode::Concise => vec![reconcile_concise(existing, locale, fields, submission)],
    }
}

/// One metafield per field: create, update or delete each independently.
fn reconcile_legacy(
    existing: &[Metafield],
    locale: &LocaleCode,
    fields: &[TranslatableField],
    submission: &TranslationSubmission,
) -> Vec<WriteIntent> {
    fields
        .iter()
        .filter_map(|field| {
            let value = submission.value_for(&field.key);
            let current = existing
                .iter()
                .find(|m| m.is_translation_of(&field.key, locale))
                .and_then(|m| m.id);

            match (current, value.is_empty()) {
                (Some(id), false) => Some(WriteIntent::Update {
                    id,
                    value: value.to_owned(),
                }),
                (Some(id), true) => Some(WriteIntent::Delete { id }),
                (None, false) => Some(WriteIntent::Create(MetafieldRecord::translation(
                    &field.key, locale, value,
                ))),
                (None, true) => None,
            }
        })
        .collect()
}

/// One blob for everything: rewrite the blob with this locale's values.
fn reconcile_concise(
    existing: &[Metafield],
    locale: &LocaleCode,
    fields: &[TranslatableField],
    submission: &TranslationSubmission,
) -> WriteIntent {
    let mut blob = ConciseBlob::from_metafields(existing);

    for field in fields {
        blob.set_translation(&field.key, locale, submission.value_for(&field.key));
    }

    match blob.id {
        Some(id) => WriteIntent::Update {
            id,
            value: blob.encode(),
        },
        None => WriteIntent::Create(blob.to_record()),
    }
}
