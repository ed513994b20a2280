//! The concise translation blob.
//!
//! In concise storage a product carries a single metafield
//! (`concise_format` / `multilingual_metafields`) whose value is a JSON array
//! of [`MetafieldRecord`]s, one per translated field and locale:
//!
//! ```json
//! [
//!   {"key":"name","namespace":"es","value":"Hola","permission_set":"write_and_sf_access"},
//!   {"key":"name","namespace":"fr","value":"Bonjour","permission_set":"write_and_sf_access"}
//! ]
//! ```
//!
//! A blob that is missing or does not parse reads as an empty record list.

use crate::types::{
    CONCISE_METAFIELD_KEY, CONCISE_METAFIELD_NAMESPACE, LocaleCode, Metafield, MetafieldId,
    MetafieldRecord, PermissionSet,
};

/// Decoded contents of a product's concise blob metafield.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConciseBlob {
    /// ID of the blob metafield, `None` if the product has none yet.
    pub id: Option<MetafieldId>,
    pub records: Vec<MetafieldRecord>,
}

impl ConciseBlob {
    /// The blob metafield among a product's metafields, if any.
    #[must_use]
    pub fn find(metafields: &[Metafield]) -> Option<&Metafield> {
        metafields.iter().find(|m| m.is_concise_blob())
    }

    /// Locate and decode the blob.
    ///
    /// A missing blob gives an empty blob with no ID. A blob whose value is
    /// not a valid record array keeps its ID but starts with no records.
    #[must_use]
    pub fn from_metafields(metafields: &[Metafield]) -> Self {
        Self::find(metafields).map_or_else(Self::default, |blob| Self {
            id: blob.id,
            records: decode_records(&blob.value).unwrap_or_default(),
        })
    }

    /// The record for `key` in `locale`.
    #[must_use]
    pub fn record(&self, key: &str, locale: &LocaleCode) -> Option<&MetafieldRecord> {
        self.records.iter().find(|r| r.is_translation_of(key, locale))
    }

    /// Write `value` as the translation of `key` in `locale`.
    ///
    /// An existing record is overwritten in place, and every *other* record
    /// with an empty value is dropped in the same step. Without an existing
    /// record, a non-empty value is appended and an empty one is ignored.
    pub fn set_translation(&mut self, key: &str, locale: &LocaleCode, value: &str) {
        let existing = self
            .records
            .iter()
            .position(|r| r.is_translation_of(key, locale));

        match existing {
            Some(written) => {
                if let Some(record) = self.records.get_mut(written) {
                    value.clone_into(&mut record.value);
                }
                let mut index = 0;
                self.records.retain(|record| {
                    let keep = index == written || !record.value.is_empty();
                    index += 1;
                    keep
                });
            }
            None if !value.is_empty() => {
                self.records
                    .push(MetafieldRecord::translation(key, locale, value));
            }
            None => {}
        }
    }

    /// Serialize the records into the blob's metafield value.
    #[must_use]
    pub fn encode(&self) -> String {
        // Records are plain strings and enums; serialization cannot fail.
        serde_json::to_string(&self.records).unwrap_or_default()
    }

    /// The blob as a metafield body, ready to be created.
    #[must_use]
    pub fn to_record(&self) -> MetafieldRecord {
        MetafieldRecord {
            key: CONCISE_METAFIELD_KEY.to_owned(),
            namespace: CONCISE_METAFIELD_NAMESPACE.to_owned(),
            value: self.encode(),
            permission_set: PermissionSet::WriteAndSfAccess,
        }
    }
}

/// Parse a blob value into its records.
#[must_use]
pub fn decode_records(value: &str) -> Option<Vec<MetafieldRecord>> {
    serde_json::from_str(value).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn locale(code: &str) -> LocaleCode {
        LocaleCode::parse(code).unwrap()
    }

    fn blob_metafield(id: i64, value: &str) -> Metafield {
        Metafield {
            id: Some(MetafieldId::new(id)),
            key: CONCISE_METAFIELD_KEY.to_owned(),
            namespace: CONCISE_METAFIELD_NAMESPACE.to_owned(),
            value: value.to_owned(),
            permission_set: PermissionSet::WriteAndSfAccess,
        }
    }

    #[test]
    fn missing_blob_is_empty() {
        let blob = ConciseBlob::from_metafields(&[]);
        assert_eq!(blob, ConciseBlob::default());
    }

    #[test]
    fn unparsable_blob_keeps_id_but_no_records() {
        let blob = ConciseBlob::from_metafields(&[blob_metafield(12, "{not json")]);
        assert_eq!(blob.id, Some(MetafieldId::new(12)));
        assert!(blob.records.is_empty());
    }

    #[test]
    fn decodes_records_and_finds_translation() {
        let value = r#"[{"key":"name","namespace":"es","value":"Hola","permission_set":"write_and_sf_access"}]"#;
        let blob = ConciseBlob::from_metafields(&[blob_metafield(3, value)]);
        assert_eq!(blob.record("name", &locale("es")).unwrap().value, "Hola");
        assert!(blob.record("name", &locale("fr")).is_none());
        assert_eq!(blob.encode(), value);
    }

    #[test]
    fn set_translation_prunes_other_empty_records() {
        let es = locale("es");
        let fr = locale("fr");
        let mut blob = ConciseBlob {
            id: None,
            records: vec![
                MetafieldRecord::translation("description", &es, ""),
                MetafieldRecord::translation("name", &fr, "Salut"),
            ],
        };

        blob.set_translation("name", &fr, "Bonjour");

        assert_eq!(
            blob.records,
            vec![MetafieldRecord::translation("name", &fr, "Bonjour")]
        );
    }

    #[test]
    fn set_translation_keeps_the_record_it_just_cleared() {
        let fr = locale("fr");
        let mut blob = ConciseBlob {
            id: None,
            records: vec![MetafieldRecord::translation("name", &fr, "Bonjour")],
        };

        blob.set_translation("name", &fr, "");

        assert_eq!(
            blob.records,
            vec![MetafieldRecord::translation("name", &fr, "")]
        );
    }

    #[test]
    fn set_translation_ignores_empty_new_values() {
        let mut blob = ConciseBlob::default();
        blob.set_translation("name", &locale("fr"), "");
        assert!(blob.records.is_empty());
    }

    #[test]
    fn to_record_targets_the_blob_metafield() {
        let mut blob = ConciseBlob::default();
        blob.set_translation("name", &locale("fr"), "Bonjour");
        let record = blob.to_record();
        assert_eq!(record.key, CONCISE_METAFIELD_KEY);
        assert_eq!(record.namespace, CONCISE_METAFIELD_NAMESPACE);
        assert_eq!(decode_records(&record.value).unwrap(), blob.records);
    }
}
