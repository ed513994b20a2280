//! Field values submitted from the translation editor.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::TranslatableField;

/// Submitted values keyed by translatable field key.
///
/// An empty string means "clear this translation". A key that is not present
/// reads the same as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationSubmission(BTreeMap<String, String>);

impl TranslationSubmission {
    /// Create an empty submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a field, builder style.
    #[must_use]
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    /// Set the value for a field.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_owned(), value.to_owned());
    }

    /// The submitted value for `key`, or `""` when absent.
    #[must_use]
    pub fn value_for(&self, key: &str) -> &str {
        self.0.get(key).map_or("", String::as_str)
    }

    /// Whether a value was submitted for `key` at all.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Keys of required fields that are missing or blank.
    #[must_use]
    pub fn missing_required<'a>(&self, fields: &'a [TranslatableField]) -> Vec<&'a str> {
        fields
            .iter()
            .filter(|field| field.required && self.value_for(&field.key).trim().is_empty())
            .map(|field| field.key.as_str())
            .collect()
    }

    /// Iterate over submitted `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationSubmission {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
