//! Product and translation route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use multilingual_core::{
    LocaleCode, LocalizedField, Metafield, MetafieldId, ProductId, StorageMode,
    TranslationSubmission, localized_values, orphaned_metafields,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    bigcommerce::{Product, ProductDetail, ProductPage, ProductUpdate},
    error::AppError,
    services::{AppliedTranslation, save_translation},
    state::AppState,
};

const DEFAULT_PAGE_SIZE: u32 = 50;
const MAX_PAGE_SIZE: u32 = 250;

/// Pagination query parameters.
#[derive(Debug, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

/// Body of `PUT /api/products/{pid}`.
#[derive(Debug, Deserialize)]
pub struct SaveProductRequest {
    /// Locale being edited; the default locale when absent.
    pub locale: Option<String>,
    /// Translatable field values keyed by field key.
    #[serde(default)]
    pub fields: TranslationSubmission,
    /// Other product fields, only applied to default-locale saves.
    #[serde(default)]
    pub product: ProductUpdate,
}

/// What a save changed.
#[derive(Debug, Serialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum SaveProductResponse {
    /// The product's own fields were updated.
    Product { product: Product },
    /// Translation metafields were written.
    Translation {
        locale: LocaleCode,
        mode: StorageMode,
        #[serde(flatten)]
        applied: AppliedTranslation,
    },
}

/// Field values for one locale.
#[derive(Debug, Serialize)]
pub struct TranslationsResponse {
    pub locale: LocaleCode,
    pub mode: StorageMode,
    pub fields: Vec<LocalizedField>,
}

async fn find_product(state: &AppState, id: ProductId) -> Result<Product, AppError> {
    state
        .bigcommerce()
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}

/// Product list handler.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ProductPage>, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let products = state.bigcommerce().list_products(page, limit).await?;
    Ok(Json(products))
}

/// Product detail handler: the product and all of its metafields.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductDetail>, AppError> {
    let product = find_product(&state, id).await?;
    let metafields = state.bigcommerce().get_metafields(id).await?;

    Ok(Json(ProductDetail {
        product,
        metafields,
    }))
}

/// Save handler.
///
/// A default-locale save updates the product itself. Any other locale is
/// validated against the required fields and written as metafields in the
/// store's current storage mode.
#[instrument(skip(state, request), fields(locale = ?request.locale))]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(request): Json<SaveProductRequest>,
) -> Result<Json<SaveProductResponse>, AppError> {
    let locales = state.settings().locales().await;

    let locale = match request.locale.as_deref() {
        None | Some("") => None,
        Some(code) => Some(LocaleCode::parse(code)?),
    }
    .filter(|code| !locales.is_default(code));

    let Some(locale) = locale else {
        let update = request.product.with_fields(&request.fields);
        if update.is_empty() {
            return Err(AppError::BadRequest("nothing to update".to_string()));
        }

        let product = state.bigcommerce().update_product(id, &update).await?;
        return Ok(Json(SaveProductResponse::Product { product }));
    };

    if !locales.contains(&locale) {
        return Err(AppError::BadRequest(format!("unknown locale: {locale}")));
    }

    let missing = request
        .fields
        .missing_required(state.translatable_fields());
    if !missing.is_empty() {
        return Err(AppError::BadRequest(format!(
            "missing required fields: {}",
            missing.join(", ")
        )));
    }

    let mode = state.settings().storage_mode().await;
    let applied = save_translation(
        state.bigcommerce(),
        id,
        mode,
        &locale,
        &locales.default_locale,
        state.translatable_fields(),
        &request.fields,
    )
    .await?;

    Ok(Json(SaveProductResponse::Translation {
        locale,
        mode,
        applied,
    }))
}

/// Localized values of the translatable fields.
///
/// Untranslated fields fall back to the product's own values.
#[instrument(skip(state))]
pub async fn translations(
    State(state): State<AppState>,
    Path((id, locale)): Path<(ProductId, String)>,
) -> Result<Json<TranslationsResponse>, AppError> {
    let locale = LocaleCode::parse(&locale)?;
    let locales = state.settings().locales().await;
    if !locales.contains(&locale) {
        return Err(AppError::NotFound(format!("locale {locale}")));
    }

    let product = find_product(&state, id).await?;
    let mode = state.settings().storage_mode().await;

    let metafields = if locales.is_default(&locale) {
        Vec::new()
    } else {
        state.bigcommerce().get_metafields(id).await?
    };

    let fields = localized_values(
        &metafields,
        mode,
        &locale,
        state.translatable_fields(),
        &product.native_values(),
    );

    Ok(Json(TranslationsResponse {
        locale,
        mode,
        fields,
    }))
}

/// Delete a single metafield.
#[instrument(skip(state))]
pub async fn delete_metafield(
    State(state): State<AppState>,
    Path((product_id, id)): Path<(ProductId, MetafieldId)>,
) -> Result<StatusCode, AppError> {
    state.bigcommerce().delete_metafield(product_id, id).await?;
    tracing::info!(%product_id, metafield_id = %id, "Metafield deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Translation metafields in the layout the store is not using.
#[instrument(skip(state))]
pub async fn orphans(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Vec<Metafield>>, AppError> {
    let metafields = state.bigcommerce().get_metafields(id).await?;
    let mode = state.settings().storage_mode().await;

    let orphans = orphaned_metafields(&metafields, mode, state.translatable_fields())
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(orphans))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::routes::tests::{app, json_body, send};

    #[tokio::test]
    async fn translation_missing_required_fields_is_rejected() {
        let body = json!({
            "locale": "fr",
            "fields": { "name": "Produit", "description": "   " }
        });

        let response = send(app(), "PUT", "/api/products/111", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(
            json["error"],
            "Bad request: missing required fields: description"
        );
    }

    #[tokio::test]
    async fn unknown_locale_is_rejected() {
        let body = json!({ "locale": "de", "fields": { "name": "Produkt" } });

        let response = send(app(), "PUT", "/api/products/111", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Bad request: unknown locale: de"
        );
    }

    #[tokio::test]
    async fn malformed_locale_is_rejected() {
        let body = json!({ "locale": "fr fr", "fields": {} });

        let response = send(app(), "PUT", "/api/products/111", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_default_locale_save_is_rejected() {
        let body = json!({ "locale": "en" });

        let response = send(app(), "PUT", "/api/products/111", Some(body)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await["error"],
            "Bad request: nothing to update"
        );
    }

    #[tokio::test]
    async fn non_numeric_product_id_is_rejected() {
        let response = send(app(), "GET", "/api/products/abc/orphans", None).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
