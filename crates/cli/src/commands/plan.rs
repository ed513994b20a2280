//! Offline reconciliation against a saved metafield list.

use std::path::Path;

use multilingual_core::{
    LocaleCode, Metafield, StorageMode, TranslationSubmission, WriteIntent,
    default_translatable_fields, reconcile,
};
use serde::Deserialize;
use tracing::info;

/// Either a bare array or a v3 API response body.
#[derive(Deserialize)]
#[serde(untagged)]
enum MetafieldsFile {
    List(Vec<Metafield>),
    Envelope { data: Vec<Metafield> },
}

impl MetafieldsFile {
    fn into_metafields(self) -> Vec<Metafield> {
        match self {
            Self::List(metafields) | Self::Envelope { data: metafields } => metafields,
        }
    }
}

/// Parse a metafields file.
fn parse_metafields(content: &str) -> Result<Vec<Metafield>, serde_json::Error> {
    serde_json::from_str::<MetafieldsFile>(content).map(MetafieldsFile::into_metafields)
}

/// Compute the writes for a translation save.
///
/// Default-locale saves update the product itself, so they plan no writes.
fn plan(
    metafields: &[Metafield],
    mode: StorageMode,
    locale: &LocaleCode,
    default_locale: &LocaleCode,
    submission: &TranslationSubmission,
) -> Vec<WriteIntent> {
    if locale == default_locale {
        return Vec::new();
    }
    reconcile(
        metafields,
        mode,
        locale,
        default_locale,
        &default_translatable_fields(),
        submission,
    )
}

/// Print the planned writes as JSON.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub async fn run(
    path: &Path,
    mode: StorageMode,
    locale: &LocaleCode,
    default_locale: &LocaleCode,
    submission: &TranslationSubmission,
) -> Result<(), Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let content = tokio::fs::read_to_string(path).await?;
    let metafields = parse_metafields(&content)?;
    info!(count = metafields.len(), %mode, %locale, "Loaded metafields");

    if locale == default_locale {
        info!("Default locale edits update the product fields; no metafield writes");
    }

    let intents = plan(&metafields, mode, locale, default_locale, submission);
    info!(writes = intents.len(), "Planned writes");

    super::print_json(&intents)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use multilingual_core::MetafieldId;

    use super::*;

    fn locale(code: &str) -> LocaleCode {
        LocaleCode::parse(code).unwrap()
    }

    #[test]
    fn reads_bare_array_and_envelope() {
        let item = r#"{"id": 7, "key": "name", "namespace": "es", "value": "Producto"}"#;

        let bare = parse_metafields(&format!("[{item}]")).unwrap();
        let wrapped = parse_metafields(&format!(r#"{{"data": [{item}], "meta": {{}}}}"#)).unwrap();

        assert_eq!(bare, wrapped);
        assert_eq!(bare[0].id, Some(MetafieldId::new(7)));
    }

    #[test]
    fn default_locale_plans_nothing() {
        let submission = TranslationSubmission::new().with("name", "Product");
        let intents = plan(
            &[],
            StorageMode::Legacy,
            &locale("en"),
            &locale("en"),
            &submission,
        );
        assert!(intents.is_empty());
    }

    #[test]
    fn plans_legacy_writes() {
        let metafields = parse_metafields(
            r#"[{"id": 7, "key": "name", "namespace": "es", "value": "Producto"}]"#,
        )
        .unwrap();
        let submission = TranslationSubmission::new()
            .with("name", "")
            .with("page_title", "Título");

        let intents = plan(
            &metafields,
            StorageMode::Legacy,
            &locale("es"),
            &locale("en"),
            &submission,
        );

        assert_eq!(intents.len(), 2);
        assert_eq!(
            intents[0],
            WriteIntent::Delete {
                id: MetafieldId::new(7)
            }
        );
        assert!(matches!(intents[1], WriteIntent::Create(ref r) if r.key == "page_title"));
    }
}
