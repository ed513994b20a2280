//! Reading translations back out of a product's metafields.

use serde::{Deserialize, Serialize};

use crate::concise::ConciseBlob;
use crate::types::{LocaleCode, Metafield, StorageMode, TranslatableField, TranslationSubmission};

/// The value the editor shows for one field in one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedField {
    pub key: String,
    pub value: String,
    /// `false` when `value` is the product's own value shown as a fallback.
    pub translated: bool,
}

/// Resolve each translatable field for `locale`.
///
/// A non-empty translation wins; otherwise the product's own value from
/// `fallback` is used (empty if the product has none).
#[must_use]
pub fn localized_values(
    metafields: &[Metafield],
    mode: StorageMode,
    locale: &LocaleCode,
    fields: &[TranslatableField],
    fallback: &TranslationSubmission,
) -> Vec<LocalizedField> {
    let blob = mode
        .is_concise()
        .then(|| ConciseBlob::from_metafields(metafields));

    fields
        .iter()
        .map(|field| {
            let translation = match &blob {
                Some(blob) => blob.record(&field.key, locale).map(|r| r.value.as_str()),
                None => metafields
                    .iter()
                    .find(|m| m.is_translation_of(&field.key, locale))
                    .map(|m| m.value.as_str()),
            }
            .filter(|value| !value.is_empty());

            LocalizedField {
                key: field.key.clone(),
                value: translation
                    .unwrap_or_else(|| fallback.value_for(&field.key))
                    .to_owned(),
                translated: translation.is_some(),
            }
        })
        .collect()
}

/// Translation metafields written in the layout `mode` does not use.
///
/// After a store switches modes these are never read or written again; they
/// are reported so a merchant can clean them up by hand.
#[must_use]
pub fn orphaned_metafields<'a>(
    metafields: &'a [Metafield],
    mode: StorageMode,
    fields: &[TranslatableField],
) -> Vec<&'a Metafield> {
    metafields
        .iter()
        .filter(|m| match mode {
            StorageMode::Concise => {
                !m.is_concise_blob() && fields.iter().any(|field| field.key == m.key)
            }
            StorageMode::Legacy => m.is_concise_blob(),
        })
        .collect()
}
