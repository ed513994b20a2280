//! BigCommerce catalog types.
//!
//! Only the fields this service reads or writes are modelled; everything
//! else in the API payloads is ignored on deserialization.

use multilingual_core::{Metafield, ProductId, TranslationSubmission};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// =============================================================================
// Response Envelope
// =============================================================================

/// Standard `{ "data": ..., "meta": ... }` wrapper of v3 responses.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Meta,
}

/// Response metadata.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    pub pagination: Option<Pagination>,
}

/// Pagination information for list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub count: u64,
    pub per_page: u64,
    pub current_page: u64,
    pub total_pages: u64,
}

impl Pagination {
    /// Whether pages remain after this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Error body returned with 4xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
}

// =============================================================================
// Product Types
// =============================================================================

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub meta_keywords: Vec<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub is_visible: bool,
    #[serde(rename = "type", default)]
    pub product_type: String,
    #[serde(default)]
    pub inventory_level: i64,
}

impl Product {
    /// The product's own values for the translatable fields.
    ///
    /// Meta keywords are joined with commas, the way they are edited.
    #[must_use]
    pub fn native_values(&self) -> TranslationSubmission {
        TranslationSubmission::new()
            .with("name", &self.name)
            .with("description", &self.description)
            .with("page_title", &self.page_title)
            .with("meta_keywords", &self.meta_keywords.join(","))
    }
}

/// Row of the product list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub stock: i64,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            stock: product.inventory_level,
        }
    }
}

/// A page of products.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub products: Vec<ProductSummary>,
    pub pagination: Option<Pagination>,
}

/// A product together with all of its metafields.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub metafields: Vec<Metafield>,
}

/// Partial product update.
///
/// All fields are optional - only provided fields will be updated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_keywords: Option<Vec<String>>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
}

impl ProductUpdate {
    /// Copy submitted translatable fields onto the update.
    ///
    /// Only fields present in `fields` are set; meta keywords are split on
    /// commas.
    #[must_use]
    pub fn with_fields(mut self, fields: &TranslationSubmission) -> Self {
        for (key, value) in fields.iter() {
            match key {
                "name" => self.name = Some(value.to_owned()),
                "description" => self.description = Some(value.to_owned()),
                "page_title" => self.page_title = Some(value.to_owned()),
                "meta_keywords" => {
                    self.meta_keywords = Some(
                        value
                            .split(',')
                            .map(str::trim)
                            .filter(|k| !k.is_empty())
                            .map(String::from)
                            .collect(),
                    );
                }
                _ => {}
            }
        }
        self
    }

    /// Whether the update would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.page_title.is_none()
            && self.meta_keywords.is_none()
            && self.price.is_none()
            && self.is_visible.is_none()
            && self.product_type.is_none()
    }
}

// =============================================================================
// Store Settings
// =============================================================================

/// Store locale settings (`/v3/settings/store/locale`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreLocale {
    #[serde(default)]
    pub default_shopper_language: Option<String>,
    #[serde(default)]
    pub shopper_language_selection_method: Option<String>,
    #[serde(default)]
    pub store_country: Option<String>,
}
