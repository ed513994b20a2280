//! Locale codes and the store's locale list.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`LocaleCode`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    /// The input string is empty.
    #[error("locale code cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("locale code must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[A-Za-z0-9_-]`.
    #[error("locale code contains invalid character {0:?}")]
    InvalidCharacter(char),
}

/// A locale code such as `en`, `es` or `ca-fr`.
///
/// Locale codes are opaque to this crate; they are used verbatim as the
/// metafield namespace for per-field translations and as the `namespace` of
/// records inside the concise blob.
///
/// ## Constraints
///
/// - Length: 1-35 characters
/// - ASCII letters, digits, `-` and `_` only
///
/// ## Examples
///
/// ```
/// use multilingual_core::LocaleCode;
///
/// assert!(LocaleCode::parse("fr").is_ok());
/// assert!(LocaleCode::parse("ca-fr").is_ok());
///
/// assert!(LocaleCode::parse("").is_err());
/// assert!(LocaleCode::parse("fr fr").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleCode(String);

impl LocaleCode {
    /// Maximum length of a locale code.
    pub const MAX_LENGTH: usize = 35;

    /// Parse a `LocaleCode` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, longer than 35 characters, or
    /// contains anything other than ASCII alphanumerics, `-` and `_`.
    pub fn parse(s: &str) -> Result<Self, LocaleError> {
        if s.is_empty() {
            return Err(LocaleError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(LocaleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(c) = s
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(LocaleError::InvalidCharacter(c));
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the locale code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `LocaleCode` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LocaleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for LocaleCode {
    type Err = LocaleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocaleCode {
    type Error = LocaleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocaleCode> for String {
    fn from(code: LocaleCode) -> Self {
        code.0
    }
}

impl AsRef<str> for LocaleCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for LocaleCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A locale offered in the editor's language picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    pub code: LocaleCode,
    pub label: String,
}

impl Locale {
    /// Create a locale entry.
    #[must_use]
    pub fn new(code: LocaleCode, label: impl Into<String>) -> Self {
        Self {
            code,
            label: label.into(),
        }
    }
}

/// The locales a store translates into.
///
/// The default locale is the language of the product's own fields; edits in
/// that locale update the product directly and never touch metafields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleSettings {
    pub default_locale: LocaleCode,
    pub available: Vec<Locale>,
}

impl LocaleSettings {
    /// Whether `code` is the store's default locale.
    #[must_use]
    pub fn is_default(&self, code: &LocaleCode) -> bool {
        &self.default_locale == code
    }

    /// Whether `code` is one of the available locales.
    #[must_use]
    pub fn contains(&self, code: &LocaleCode) -> bool {
        self.available.iter().any(|locale| &locale.code == code)
    }

    /// Add a locale, replacing the label of an existing entry with the same code.
    pub fn upsert(&mut self, locale: Locale) {
        if let Some(existing) = self.available.iter_mut().find(|l| l.code == locale.code) {
            existing.label = locale.label;
        } else {
            self.available.push(locale);
        }
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            default_locale: LocaleCode(String::from("en")),
            available: default_locales(),
        }
    }
}

/// English, Spanish and French, with English as the store language.
#[must_use]
pub fn default_locales() -> Vec<Locale> {
    [("en", "English"), ("es", "Spanish"), ("fr", "French")]
        .into_iter()
        .map(|(code, label)| Locale::new(LocaleCode(code.to_owned()), label))
        .collect()
}
