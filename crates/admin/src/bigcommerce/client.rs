//! BigCommerce v3 REST client authenticated with an API account token.

use std::sync::Arc;

use multilingual_core::{Metafield, MetafieldId, MetafieldRecord, ProductId};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap};
use reqwest::{RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;
use url::Url;

use crate::config::BigCommerceConfig;

use super::{
    BigCommerceError,
    types::{Envelope, ErrorBody, Product, ProductPage, ProductSummary, ProductUpdate, StoreLocale},
};

/// Page size used when walking every metafield of a product (API maximum).
const METAFIELD_PAGE_LIMIT: u32 = 250;

/// Fallback wait when a 429 carries no reset header.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// BigCommerce catalog API client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct BigCommerceClient {
    inner: Arc<BigCommerceClientInner>,
}

struct BigCommerceClientInner {
    client: reqwest::Client,
    /// `{api_url}/stores/{hash}/v3/`
    base_url: Url,
    access_token: SecretString,
}

#[derive(Serialize)]
struct MetafieldValueUpdate<'a> {
    value: &'a str,
}

impl BigCommerceClient {
    /// Create a new client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns `BigCommerceError::Url` if the API URL and store hash do not
    /// form a valid base URL.
    pub fn new(config: &BigCommerceConfig) -> Result<Self, BigCommerceError> {
        let base_url = config
            .api_url
            .join(&format!("stores/{}/v3/", config.store_hash))?;

        Ok(Self {
            inner: Arc::new(BigCommerceClientInner {
                client: reqwest::Client::new(),
                base_url,
                access_token: config.access_token.clone(),
            }),
        })
    }

    /// The `/v3/` base URL requests are made against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    fn endpoint(&self, path: &str) -> Result<Url, BigCommerceError> {
        Ok(self.inner.base_url.join(path)?)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("X-Auth-Token", self.inner.access_token.expose_secret())
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
    }

    /// Send a request and map non-success statuses to errors.
    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, BigCommerceError> {
        let response = self.authorized(request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let headers = response.headers().clone();
        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status, &headers, &body))
    }

    /// Send a request and decode the `data` envelope.
    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, BigCommerceError> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    // =========================================================================
    // Product methods
    // =========================================================================

    /// Get a page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self))]
    pub async fn list_products(&self, page: u32, limit: u32) -> Result<ProductPage, BigCommerceError> {
        let mut url = self.endpoint("catalog/products")?;
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());

        let envelope: Envelope<Vec<Product>> = self.fetch(self.inner.client.get(url)).await?;

        Ok(ProductPage {
            products: envelope.data.iter().map(ProductSummary::from).collect(),
            pagination: envelope.meta.pagination,
        })
    }

    /// Get a product by ID, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or returns an error response.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<Option<Product>, BigCommerceError> {
        let url = self.endpoint(&format!("catalog/products/{id}"))?;

        match self.fetch::<Product>(self.inner.client.get(url)).await {
            Ok(envelope) => Ok(Some(envelope.data)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Update a product's own fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the update is rejected.
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: &ProductUpdate,
    ) -> Result<Product, BigCommerceError> {
        let url = self.endpoint(&format!("catalog/products/{id}"))?;
        let envelope: Envelope<Product> = self.fetch(self.inner.client.put(url).json(update)).await?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(envelope.data)
    }

    // =========================================================================
    // Metafield methods
    // =========================================================================

    /// Get every metafield of a product, following pagination.
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_metafields(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<Metafield>, BigCommerceError> {
        let mut metafields = Vec::new();
        let mut page = 1_u32;

        loop {
            let mut url = self.endpoint(&format!("catalog/products/{product_id}/metafields"))?;
            url.query_pairs_mut()
                .append_pair("page", &page.to_string())
                .append_pair("limit", &METAFIELD_PAGE_LIMIT.to_string());

            let envelope: Envelope<Vec<Metafield>> =
                self.fetch(self.inner.client.get(url)).await?;
            metafields.extend(envelope.data);

            match envelope.meta.pagination {
                Some(pagination) if pagination.has_next_page() => page += 1,
                _ => break,
            }
        }

        tracing::debug!(count = metafields.len(), "Fetched metafields");
        Ok(metafields)
    }

    /// Create a metafield on a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the metafield is rejected
    /// (for example an empty value, or a duplicate namespace/key pair).
    #[instrument(skip(self, record), fields(product_id = %product_id, key = %record.key, namespace = %record.namespace))]
    pub async fn create_metafield(
        &self,
        product_id: ProductId,
        record: &MetafieldRecord,
    ) -> Result<Metafield, BigCommerceError> {
        let url = self.endpoint(&format!("catalog/products/{product_id}/metafields"))?;
        let envelope: Envelope<Metafield> =
            self.fetch(self.inner.client.post(url).json(record)).await?;
        Ok(envelope.data)
    }

    /// Replace the value of a metafield.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the value is rejected.
    #[instrument(skip(self, value), fields(product_id = %product_id, metafield_id = %id))]
    pub async fn update_metafield(
        &self,
        product_id: ProductId,
        id: MetafieldId,
        value: &str,
    ) -> Result<Metafield, BigCommerceError> {
        let url = self.endpoint(&format!("catalog/products/{product_id}/metafields/{id}"))?;
        let envelope: Envelope<Metafield> = self
            .fetch(self.inner.client.put(url).json(&MetafieldValueUpdate { value }))
            .await?;
        Ok(envelope.data)
    }

    /// Delete a metafield.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(product_id = %product_id, metafield_id = %id))]
    pub async fn delete_metafield(
        &self,
        product_id: ProductId,
        id: MetafieldId,
    ) -> Result<(), BigCommerceError> {
        let url = self.endpoint(&format!("catalog/products/{product_id}/metafields/{id}"))?;
        self.send(self.inner.client.delete(url)).await?;
        Ok(())
    }

    // =========================================================================
    // Store settings
    // =========================================================================

    /// Get the store's locale settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_store_locale(&self) -> Result<StoreLocale, BigCommerceError> {
        let url = self.endpoint("settings/store/locale")?;
        let envelope: Envelope<StoreLocale> = self.fetch(self.inner.client.get(url)).await?;
        Ok(envelope.data)
    }
}

/// Map a non-success response to an error.
fn error_for_status(status: StatusCode, headers: &HeaderMap, body: &str) -> BigCommerceError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| match e.detail {
            Some(detail) if !detail.is_empty() => format!("{}: {detail}", e.title),
            _ => e.title,
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_owned());

    match status {
        StatusCode::NOT_FOUND => BigCommerceError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BigCommerceError::Unauthorized(message),
        StatusCode::UNPROCESSABLE_ENTITY => BigCommerceError::Validation(message),
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = headers
                .get("X-Rate-Limit-Time-Reset-Ms")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map_or(DEFAULT_RETRY_AFTER_SECS, |ms| ms.div_ceil(1000));
            BigCommerceError::RateLimited(retry_after)
        }
        other => BigCommerceError::Status(other.as_u16(), message),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;
    use crate::config::AdminConfig;

    #[test]
    fn base_url_includes_store_hash() {
        let client = BigCommerceClient::new(&AdminConfig::for_tests().bigcommerce).unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://api.bigcommerce.com/stores/abc123/v3/"
        );
        assert_eq!(
            client.endpoint("catalog/products/111/metafields").unwrap().as_str(),
            "https://api.bigcommerce.com/stores/abc123/v3/catalog/products/111/metafields"
        );
    }

    #[test]
    fn not_found_uses_error_title() {
        let body = r#"{"status":404,"title":"The requested product was not found."}"#;
        let err = error_for_status(StatusCode::NOT_FOUND, &HeaderMap::new(), body);
        assert!(
            matches!(err, BigCommerceError::NotFound(ref m) if m == "The requested product was not found.")
        );
    }

    #[test]
    fn unprocessable_entity_is_validation() {
        let body = r#"{"status":422,"title":"JSON data is missing or invalid","detail":"value must not be empty"}"#;
        let err = error_for_status(StatusCode::UNPROCESSABLE_ENTITY, &HeaderMap::new(), body);
        assert!(matches!(
            err,
            BigCommerceError::Validation(ref m)
                if m == "JSON data is missing or invalid: value must not be empty"
        ));
    }

    #[test]
    fn rate_limit_reads_reset_header() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Rate-Limit-Time-Reset-Ms", HeaderValue::from_static("1500"));
        let err = error_for_status(StatusCode::TOO_MANY_REQUESTS, &headers, "");
        assert!(matches!(err, BigCommerceError::RateLimited(2)));

        let err = error_for_status(StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new(), "");
        assert!(matches!(
            err,
            BigCommerceError::RateLimited(DEFAULT_RETRY_AFTER_SECS)
        ));
    }

    #[test]
    fn auth_failures_are_unauthorized() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let err = error_for_status(status, &HeaderMap::new(), "denied");
            assert!(matches!(err, BigCommerceError::Unauthorized(ref m) if m == "denied"));
        }
    }

    #[test]
    fn other_statuses_keep_code_and_raw_body() {
        let err = error_for_status(StatusCode::BAD_GATEWAY, &HeaderMap::new(), "upstream down");
        assert!(matches!(err, BigCommerceError::Status(502, ref m) if m == "upstream down"));
    }
}
