//! Commands that talk to a live store.

use multilingual_admin::{bigcommerce::BigCommerceClient, config::AdminConfig, services};
use multilingual_core::{
    LocaleCode, ProductId, StorageMode, TranslationSubmission, default_translatable_fields,
    orphaned_metafields,
};
use tracing::{info, warn};

fn connect() -> Result<(AdminConfig, BigCommerceClient), Box<dyn std::error::Error>> {
    let config = AdminConfig::from_env()?;
    let client = BigCommerceClient::new(&config.bigcommerce)?;
    info!(store_hash = %config.bigcommerce.store_hash, "Connected to store");
    Ok((config, client))
}

/// Save a translation and print what was written.
///
/// # Errors
///
/// Returns an error if configuration is missing, required fields are blank,
/// or any API call fails. Writes made before a failure are kept.
pub async fn apply(
    product_id: ProductId,
    locale: &LocaleCode,
    mode: Option<StorageMode>,
    submission: &TranslationSubmission,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, client) = connect()?;
    let mode = mode.unwrap_or(config.storage_mode);
    let fields = default_translatable_fields();

    if config.locales.is_default(locale) {
        return Err(format!(
            "{locale} is the default locale; edit the product fields instead"
        )
        .into());
    }

    let missing = submission.missing_required(&fields);
    if !missing.is_empty() {
        return Err(format!("missing required fields: {}", missing.join(", ")).into());
    }

    let applied = services::save_translation(
        &client,
        product_id,
        mode,
        locale,
        &config.locales.default_locale,
        &fields,
        submission,
    )
    .await
    .inspect_err(|e| warn!(error = %e, "Translation save failed"))?;

    info!(writes = applied.intents.len(), "Translation saved");
    super::print_json(&applied)
}

/// Print metafields written in the layout `mode` does not read.
///
/// # Errors
///
/// Returns an error if configuration is missing or the API call fails.
pub async fn orphans(
    product_id: ProductId,
    mode: Option<StorageMode>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (config, client) = connect()?;
    let mode = mode.unwrap_or(config.storage_mode);

    let metafields = client.get_metafields(product_id).await?;
    let orphans = orphaned_metafields(&metafields, mode, &default_translatable_fields());
    info!(count = orphans.len(), %mode, "Found orphaned metafields");

    super::print_json(&orphans)
}
