//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 8000)
//! - `ADMIN_BASE_URL` - Public URL; `https://` enables secure cookies
//! - `ADMIN_STATIC_DIR` - Static assets directory (default: crates/admin/static)
//! - `CATALOG_API_URL` - Catalog API base URL (default: <https://api.escuelajs.co/api/v1/>)
//! - `CATALOG_PLACEHOLDER_IMAGE` - Image used for products without images
//! - `LOG_FORMAT` - `text` (default) or `json`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use catalog_admin_core::DEFAULT_PLACEHOLDER_IMAGE;
use thiserror::Error;
use url::Url;

/// Default catalog API endpoint.
pub const DEFAULT_CATALOG_API_URL: &str = "https://api.escuelajs.co/api/v1/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, if deployed behind a proxy
    pub base_url: Option<String>,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
    /// Remote catalog API configuration
    pub catalog: CatalogConfig,
    /// Log output format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Remote catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL; always ends with `/` so relative paths join beneath it
    pub base_url: Url,
    /// Image used for products without images
    pub placeholder_image: String,
}

impl CatalogConfig {
    /// Build a catalog configuration from a raw base URL.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse or is not http(s).
    pub fn new(base_url: &str, placeholder_image: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)
                .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e))?,
            placeholder_image: placeholder_image.to_string(),
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        Self::new(
            &get_env_or_default("CATALOG_API_URL", DEFAULT_CATALOG_API_URL),
            &get_env_or_default("CATALOG_PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE),
        )
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ADMIN_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_PORT".to_string(), e.to_string()))?;
        let base_url = get_optional_env("ADMIN_BASE_URL");
        let static_dir = PathBuf::from(get_env_or_default("ADMIN_STATIC_DIR", "crates/admin/static"));
        let catalog = CatalogConfig::from_env()?;
        let log_format = parse_log_format(&get_env_or_default("LOG_FORMAT", "text"))?;
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
            base_url,
            static_dir,
            catalog,
            log_format,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Configuration for a given catalog endpoint with every other setting
    /// at its default. Used by tests and local tooling.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `catalog_url` is not a valid http(s) URL.
    pub fn with_catalog_url(catalog_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 8000,
            base_url: None,
            static_dir: PathBuf::from("crates/admin/static"),
            catalog: CatalogConfig::new(catalog_url, DEFAULT_PLACEHOLDER_IMAGE)?,
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url
            .as_deref()
            .is_some_and(|url| url.starts_with("https://"))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" | "" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidEnvVar(
            "LOG_FORMAT".to_string(),
            format!("expected \"text\" or \"json\", got \"{other}\""),
        )),
    }
}

/// Parse a catalog base URL, requiring http(s) and a trailing slash.
fn normalize_base_url(raw: &str) -> Result<Url, String> {
    let raw = raw.trim();
    let with_slash = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };

    let url = Url::parse(&with_slash).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(format!("unsupported scheme \"{scheme}\"")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url_adds_trailing_slash() {
        let url = normalize_base_url("http://localhost:9000/api/v1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/v1/");
        assert_eq!(
            url.join("products/").unwrap().as_str(),
            "http://localhost:9000/api/v1/products/"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_other_schemes() {
        assert!(normalize_base_url("ftp://catalog.example/").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }

    #[test]
    fn test_default_catalog_url_is_valid() {
        let config = CatalogConfig::new(DEFAULT_CATALOG_API_URL, DEFAULT_PLACEHOLDER_IMAGE).unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_CATALOG_API_URL);
    }

    #[test]
    fn test_parse_log_format() {
        assert_eq!(parse_log_format("JSON").unwrap(), LogFormat::Json);
        assert_eq!(parse_log_format("text").unwrap(), LogFormat::Text);
        assert!(matches!(
            parse_log_format("xml"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }

    #[test]
    fn test_socket_addr() {
        let config = AdminConfig::with_catalog_url("http://127.0.0.1:9000").unwrap();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }

    #[test]
    fn test_secure_cookies_follow_base_url() {
        let mut config = AdminConfig::with_catalog_url("http://127.0.0.1:9000").unwrap();
        assert!(!config.secure_cookies());

        config.base_url = Some("https://admin.example.com".to_string());
        assert!(config.secure_cookies());
    }
}
