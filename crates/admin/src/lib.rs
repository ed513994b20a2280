//! Multilingual Admin library.
//!
//! HTTP API for editing BigCommerce product translations. Translations are
//! stored as product metafields, either one per field and locale or as a
//! single JSON blob per product.
//!
//! # Security
//!
//! This crate holds a BigCommerce API account token with write access to the
//! catalog. Bind it to a private interface only.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod bigcommerce;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;
