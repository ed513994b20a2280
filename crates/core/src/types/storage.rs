//! Store-wide choice of metafield layout for translations.

use serde::{Deserialize, Serialize};

/// How a store lays out translation metafields.
///
/// Switching modes does not migrate anything: metafields written in the
/// other layout stay on the product untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// One JSON blob metafield per product holding every field and locale.
    #[default]
    Concise,
    /// One metafield per field per locale (namespace = locale, key = field).
    Legacy,
}

impl StorageMode {
    /// Map the store's `use concise storage` flag to a mode.
    #[must_use]
    pub const fn from_concise_flag(concise: bool) -> Self {
        if concise { Self::Concise } else { Self::Legacy }
    }

    /// Whether this is the single-blob layout.
    #[must_use]
    pub const fn is_concise(self) -> bool {
        matches!(self, Self::Concise)
    }
}

impl std::fmt::Display for StorageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Concise => write!(f, "concise"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

impl std::str::FromStr for StorageMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "concise" => Ok(Self::Concise),
            "legacy" => Ok(Self::Legacy),
            _ => Err(format!("invalid storage mode: {s}")),
        }
    }
}
