//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional:
//! - `BHARAT_API_BASE_URL` - REST backend prefix (default: `http://localhost:5000/api`)
//! - `BHARAT_ASSETS_BASE_URL` - Origin serving shared HTML fragments (default: `http://localhost:5000`)
//! - `BHARAT_STORAGE_DIR` - Directory backing local storage (default: `.bharat`)
//! - `BHARAT_CATALOG_PATH` - Static catalog shown when the backend is down
//!   (default: `crates/storefront/content/catalog.yaml`)
//! - `BHARAT_HTTP_TIMEOUT_SECS` - Request timeout; unset means requests never time out
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default REST backend prefix.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Default origin for shared HTML fragments.
pub const DEFAULT_ASSETS_BASE_URL: &str = "http://localhost:5000";

/// Default storage directory.
pub const DEFAULT_STORAGE_DIR: &str = ".bharat";

/// Default static catalog path.
pub const DEFAULT_CATALOG_PATH: &str = "crates/storefront/content/catalog.yaml";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// REST backend prefix, e.g. `http://localhost:5000/api`
    pub api_base_url: Url,
    /// Origin the navbar/footer fragments are served from
    pub assets_base_url: Url,
    /// Directory backing the file storage
    pub storage_dir: PathBuf,
    /// Static catalog rendered when the backend is unavailable
    pub catalog_path: PathBuf,
    /// Optional per-request timeout
    pub http_timeout: Option<Duration>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_base_url: parse_default_url(DEFAULT_API_BASE_URL),
            assets_base_url: parse_default_url(DEFAULT_ASSETS_BASE_URL),
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            http_timeout: None,
            sentry_dsn: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL or the timeout fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = get_url("BHARAT_API_BASE_URL", DEFAULT_API_BASE_URL)?;
        let assets_base_url = get_url("BHARAT_ASSETS_BASE_URL", DEFAULT_ASSETS_BASE_URL)?;
        let storage_dir = PathBuf::from(get_env_or_default(
            "BHARAT_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));
        let catalog_path = PathBuf::from(get_env_or_default(
            "BHARAT_CATALOG_PATH",
            DEFAULT_CATALOG_PATH,
        ));
        let http_timeout = get_optional_env("BHARAT_HTTP_TIMEOUT_SECS")
            .map(|raw| parse_timeout("BHARAT_HTTP_TIMEOUT_SECS", &raw))
            .transpose()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            api_base_url,
            assets_base_url,
            storage_dir,
            catalog_path,
            http_timeout,
            sentry_dsn,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a URL from the environment, falling back to a default.
fn get_url(key: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = get_env_or_default(key, default);
    parse_url(key, &raw)
}

/// Parse a base URL.
///
/// Only `http` and `https` are accepted, and a trailing slash is stripped so
/// endpoint paths can be appended uniformly.
fn parse_url(key: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim().trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

fn parse_timeout(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if secs == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than zero".to_string(),
        ));
    }
    Ok(Duration::from_secs(secs))
}

#[allow(clippy::expect_used)]
fn parse_default_url(raw: &str) -> Url {
    Url::parse(raw).expect("default URLs are valid")
}
