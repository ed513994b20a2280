//! Product fields that can be translated.

use serde::{Deserialize, Serialize};

/// Editor widget for a translatable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldInput {
    /// Single-line text input.
    Input,
    /// Multi-line text area.
    Textarea,
}

/// A product field eligible for localization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatableField {
    /// Product field name; also the metafield key in legacy storage.
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub input: FieldInput,
    pub required: bool,
}

impl TranslatableField {
    /// Create a field definition.
    #[must_use]
    pub fn new(key: &str, label: &str, input: FieldInput, required: bool) -> Self {
        Self {
            key: key.to_owned(),
            label: label.to_owned(),
            input,
            required,
        }
    }
}

/// Name, description, page title and meta keywords, in editor order.
#[must_use]
pub fn default_translatable_fields() -> Vec<TranslatableField> {
    vec![
        TranslatableField::new("name", "Name", FieldInput::Input, true),
        TranslatableField::new("description", "Description", FieldInput::Textarea, true),
        TranslatableField::new("page_title", "Page Title", FieldInput::Input, false),
        TranslatableField::new("meta_keywords", "Meta Keywords", FieldInput::Input, false),
    ]
}
