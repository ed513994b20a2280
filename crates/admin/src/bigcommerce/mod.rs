//! BigCommerce REST API client.
//!
//! # Security
//!
//! The access token has read/write access to the store's catalog. Keep this
//! service on a private network.
//!
//! # Architecture
//!
//! - Plain REST against `/stores/{hash}/v3` with `reqwest`
//! - Direct API calls (no local sync, no caching)
//! - Rate limiting is surfaced to the caller, never retried
//!
//! # Example
//!
//! ```rust,ignore
//! use multilingual_admin::bigcommerce::BigCommerceClient;
//!
//! let client = BigCommerceClient::new(&config.bigcommerce)?;
//!
//! let product = client.get_product(ProductId::new(111)).await?;
//! let metafields = client.get_metafields(ProductId::new(111)).await?;
//! ```

mod client;
pub mod types;

pub use client::BigCommerceClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when calling the BigCommerce API.
#[derive(Debug, Error)]
pub enum BigCommerceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by BigCommerce.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Request body rejected (HTTP 422).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other non-success status.
    #[error("Unexpected status {0}: {1}")]
    Status(u16, String),
}

impl BigCommerceError {
    /// Whether the error means the requested resource does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
