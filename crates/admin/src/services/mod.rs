//! Business logic services for admin.
//!
//! # Services
//!
//! - `settings` - In-process storage mode and locale settings
//! - `translation` - Applying a translation submission to a product's metafields

pub mod settings;
pub mod translation;

pub use settings::SettingsStore;
pub use translation::{
    ApplyError, AppliedTranslation, MetafieldBackend, TranslationError, save_translation,
};
