//! Product metafields as stored by the BigCommerce catalog.

use serde::{Deserialize, Serialize};

use super::id::MetafieldId;
use super::locale::LocaleCode;

/// Key of the single metafield holding every translation in concise mode.
pub const CONCISE_METAFIELD_KEY: &str = "multilingual_metafields";

/// Namespace of the concise blob metafield.
pub const CONCISE_METAFIELD_NAMESPACE: &str = "concise_format";

/// Who may read and write a metafield.
///
/// Maps to BigCommerce's `permission_set` values. Translations must be
/// readable from the storefront, so everything written here uses
/// [`PermissionSet::WriteAndSfAccess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PermissionSet {
    AppOnly,
    Read,
    Write,
    ReadAndSfAccess,
    #[default]
    WriteAndSfAccess,
}

/// A metafield attached to a product.
///
/// `id` is `None` until the record has been persisted. In legacy storage the
/// namespace is a locale code and the key a translatable field key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metafield {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MetafieldId>,
    pub key: String,
    pub namespace: String,
    pub value: String,
    #[serde(default)]
    pub permission_set: PermissionSet,
}

impl Metafield {
    /// Whether this metafield stores the translation of `key` for `locale`.
    #[must_use]
    pub fn is_translation_of(&self, key: &str, locale: &LocaleCode) -> bool {
        self.key == key && self.namespace == locale.as_str()
    }

    /// Whether this is the concise blob.
    #[must_use]
    pub fn is_concise_blob(&self) -> bool {
        self.key == CONCISE_METAFIELD_KEY
    }
}

/// An unpersisted metafield: the body of a create call, and the shape of each
/// entry inside the concise blob.
///
/// Field order is significant: it is the serialized order inside the blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetafieldRecord {
    pub key: String,
    pub namespace: String,
    pub value: String,
    #[serde(default)]
    pub permission_set: PermissionSet,
}

impl MetafieldRecord {
    /// A storefront-readable translation record for `key` in `locale`.
    #[must_use]
    pub fn translation(key: &str, locale: &LocaleCode, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            namespace: locale.as_str().to_owned(),
            value: value.to_owned(),
            permission_set: PermissionSet::WriteAndSfAccess,
        }
    }

    /// Whether this record stores the translation of `key` for `locale`.
    #[must_use]
    pub fn is_translation_of(&self, key: &str, locale: &LocaleCode) -> bool {
        self.key == key && self.namespace == locale.as_str()
    }
}
