//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BIGCOMMERCE_STORE_HASH` - Store hash from the store's API path (`stores/{hash}`)
//! - `BIGCOMMERCE_ACCESS_TOKEN` - API account access token (catalog read/write)
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `BIGCOMMERCE_API_URL` - API origin (default: <https://api.bigcommerce.com>)
//! - `DEFAULT_LOCALE` - Language of the product's own fields (default: en)
//! - `AVAILABLE_LOCALES` - `code:Label` pairs, comma separated
//!   (default: `en:English,es:Spanish,fr:French`)
//! - `CONCISE_METAFIELD_STORAGE` - `true` for one blob per product, `false`
//!   for one metafield per field and locale (default: true)
//! - `LOG_FORMAT` - `json` for structured logs, anything else for text
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - 0.0 to 1.0 (default: 1.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use multilingual_core::{Locale, LocaleCode, LocaleSettings, StorageMode};
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_API_URL: &str = "https://api.bigcommerce.com";
const DEFAULT_LOCALES: &str = "en:English,es:Spanish,fr:French";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// BigCommerce API configuration
    pub bigcommerce: BigCommerceConfig,
    /// Default and available locales
    pub locales: LocaleSettings,
    /// Initial translation storage layout
    pub storage_mode: StorageMode,
    /// Emit JSON logs instead of text
    pub json_logs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// BigCommerce API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct BigCommerceConfig {
    /// Store hash (the `{hash}` in `/stores/{hash}/v3`)
    pub store_hash: String,
    /// API account access token (sent as `X-Auth-Token`)
    pub access_token: SecretString,
    /// API origin
    pub api_url: Url,
}

impl std::fmt::Debug for BigCommerceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BigCommerceConfig")
            .field("store_hash", &self.store_hash)
            .field("access_token", &"[REDACTED]")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

impl BigCommerceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_url = get_env_or_default("BIGCOMMERCE_API_URL", DEFAULT_API_URL);
        let api_url = Url::parse(&api_url).map_err(|e| {
            ConfigError::InvalidEnvVar("BIGCOMMERCE_API_URL".to_string(), e.to_string())
        })?;

        Ok(Self {
            store_hash: get_required_env("BIGCOMMERCE_STORE_HASH")?,
            access_token: get_validated_secret("BIGCOMMERCE_ACCESS_TOKEN")?,
            api_url,
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the access token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;

        let bigcommerce = BigCommerceConfig::from_env()?;
        let locales = parse_locale_settings(
            &get_env_or_default("DEFAULT_LOCALE", "en"),
            &get_env_or_default("AVAILABLE_LOCALES", DEFAULT_LOCALES),
        )?;
        let concise = parse_bool(
            "CONCISE_METAFIELD_STORAGE",
            &get_env_or_default("CONCISE_METAFIELD_STORAGE", "true"),
        )?;
        let json_logs = get_optional_env("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json"));

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            bigcommerce,
            locales,
            storage_mode: StorageMode::from_concise_flag(concise),
            json_logs,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the BigCommerce configuration.
    #[must_use]
    pub const fn bigcommerce(&self) -> &BigCommerceConfig {
        &self.bigcommerce
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean flag (`true`/`false`/`1`/`0`, case-insensitive).
fn parse_bool(var_name: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("expected true or false, got '{other}'"),
        )),
    }
}

/// Parse the default locale and the `code:Label` locale list.
///
/// The default locale must be one of the listed locales. A pair without a
/// label uses the code as its label.
fn parse_locale_settings(default: &str, available: &str) -> Result<LocaleSettings, ConfigError> {
    let invalid = |var: &str, e: &dyn std::fmt::Display| {
        ConfigError::InvalidEnvVar(var.to_string(), e.to_string())
    };

    let default_locale = LocaleCode::parse(default.trim()).map_err(|e| invalid("DEFAULT_LOCALE", &e))?;

    let mut settings = LocaleSettings {
        default_locale,
        available: Vec::new(),
    };
    for entry in available.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (code, label) = entry.split_once(':').unwrap_or((entry, entry));
        let code = LocaleCode::parse(code.trim()).map_err(|e| invalid("AVAILABLE_LOCALES", &e))?;
        settings.upsert(Locale::new(code, label.trim()));
    }

    if !settings.contains(&settings.default_locale) {
        return Err(ConfigError::InvalidEnvVar(
            "AVAILABLE_LOCALES".to_string(),
            format!(
                "must include the default locale '{}'",
                settings.default_locale
            ),
        ));
    }

    Ok(settings)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the token from the store's API account."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
impl AdminConfig {
    /// Configuration for unit tests: default locales, concise storage.
    #[allow(clippy::unwrap_used)]
    pub(crate) fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            bigcommerce: BigCommerceConfig {
                store_hash: "abc123".to_string(),
                access_token: SecretString::from("tkn-9f8Qz2LmXw4Rb7Yc"),
                api_url: Url::parse("https://api.bigcommerce.com").unwrap(),
            },
            locales: LocaleSettings::default(),
            storage_mode: StorageMode::Concise,
            json_logs: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-access-token", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("k7Jq2nX9vB4mT1wR8zL5pC3hG6dF0sA", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("FLAG", "TRUE").unwrap());
        assert!(!parse_bool("FLAG", "0").unwrap());
        assert!(matches!(
            parse_bool("FLAG", "maybe"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_parse_locale_settings() {
        let settings = parse_locale_settings("en", "en:English, es:Spanish, ca-fr").unwrap();
        assert_eq!(settings.default_locale, "en");
        let labels: Vec<_> = settings.available.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["English", "Spanish", "ca-fr"]);
    }

    #[test]
    fn test_parse_locale_settings_requires_default() {
        let result = parse_locale_settings("de", DEFAULT_LOCALES);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_parse_locale_settings_rejects_bad_code() {
        let result = parse_locale_settings("en", "en:English,fr fr:French");
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_socket_addr() {
        let addr = AdminConfig::for_tests().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }

    #[test]
    fn test_bigcommerce_config_debug_redacts_token() {
        let config = AdminConfig::for_tests().bigcommerce;
        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("abc123"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("tkn-9f8Qz2LmXw4Rb7Yc"));
    }
}
