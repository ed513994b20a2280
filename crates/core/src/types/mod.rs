//! Core types for the multilingual product editor.
//!
//! This module provides type-safe wrappers for the catalog and translation
//! concepts the reconciler works with.

pub mod field;
pub mod id;
pub mod locale;
pub mod metafield;
pub mod storage;
pub mod submission;

pub use field::{FieldInput, TranslatableField, default_translatable_fields};
pub use id::*;
pub use locale::{Locale, LocaleCode, LocaleError, LocaleSettings, default_locales};
pub use metafield::{
    CONCISE_METAFIELD_KEY, CONCISE_METAFIELD_NAMESPACE, Metafield, MetafieldRecord, PermissionSet,
};
pub use storage::StorageMode;
pub use submission::TranslationSubmission;
