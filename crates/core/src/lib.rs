//! Multilingual Core - translation types and metafield reconciliation.
//!
//! This crate provides the pieces shared by the admin service and the CLI:
//! - `admin` - JSON API that proxies the BigCommerce catalog
//! - `cli` - offline planning and one-off translation writes
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. Callers fetch a product's metafields, hand them to
//! [`reconcile`], and apply the returned [`WriteIntent`]s themselves.
//!
//! # Modules
//!
//! - [`types`] - IDs, locale codes, metafields, storage modes, translatable fields
//! - [`concise`] - Encoding of the single-blob ("concise") metafield format
//! - [`reconcile`] - Translation edit → metafield write intents
//! - [`localize`] - Reading translated values back out of metafields

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod concise;
pub mod localize;
pub mod reconcile;
pub mod types;

pub use concise::ConciseBlob;
pub use localize::{LocalizedField, localized_values, orphaned_metafields};
pub use reconcile::{WriteIntent, reconcile};
pub use types::*;
