//! Web front-end configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//! - `HBNB_HOST` - Bind address (default: 127.0.0.1)
//! - `HBNB_PORT` - Listen port (default: 8000)
//! - `HBNB_API_URL` - Root of the HBnB REST API (default: `http://localhost:5000/api/v1/`)
//! - `HBNB_API_TIMEOUT_SECS` - Per-request timeout for REST calls (default: 10)
//! - `HBNB_STATIC_DIR` - Directory served under `/static` (default: crates/web/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:5000/api/v1/";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Web front-end configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// HBnB REST API settings
    pub api: ApiConfig,
    /// Directory holding the stylesheet and other static assets
    pub static_dir: PathBuf,
    /// Error tracking settings
    pub sentry: SentryConfig,
}

/// HBnB REST API settings.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API root, always ending with `/` so relative endpoints join beneath it
    pub base_url: Url,
    /// Timeout applied to every request
    pub timeout: Duration,
}

/// Sentry settings. Sentry stays disabled without a DSN.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    pub dsn: Option<String>,
    pub environment: Option<String>,
    pub sample_rate: f32,
    pub traces_sample_rate: f32,
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            host: parse_env_or_default("HBNB_HOST", "127.0.0.1")?,
            port: parse_env_or_default("HBNB_PORT", "8000")?,
            api: ApiConfig::from_env()?,
            static_dir: PathBuf::from(get_env_or_default("HBNB_STATIC_DIR", "crates/web/static")),
            sentry: SentryConfig::from_env()?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl ApiConfig {
    /// Build API settings from a root URL and timeout.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse or cannot carry a path.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)
                .map_err(|e| ConfigError::InvalidEnvVar("HBNB_API_URL".to_string(), e))?,
            timeout,
        })
    }

    fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs: u64 = parse_env_or_default("HBNB_API_TIMEOUT_SECS", "10")?;
        Self::new(
            &get_env_or_default("HBNB_API_URL", DEFAULT_API_URL),
            Duration::from_secs(timeout_secs),
        )
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN"),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", "1.0")?,
            traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the API root and make sure it ends with `/`.
///
/// `Url::join` replaces the last path segment unless the base ends with a
/// slash, so `http://host/api/v1` would otherwise resolve `places/` to
/// `http://host/api/places/`.
fn normalize_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw.trim()).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("URL cannot be used as a base".to_string());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_trailing_slash() {
        let url = normalize_base_url("http://localhost:5000/api/v1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/v1/");
        assert_eq!(
            url.join("places/").unwrap().as_str(),
            "http://localhost:5000/api/v1/places/"
        );
    }

    #[test]
    fn test_normalize_keeps_existing_slash() {
        let url = normalize_base_url(DEFAULT_API_URL).unwrap();
        assert_eq!(url.as_str(), DEFAULT_API_URL);
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_base_url("not a url").is_err());
        assert!(normalize_base_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_api_config_reports_variable_name() {
        let err = ApiConfig::new("::", Duration::from_secs(1)).unwrap_err();
        assert!(err.to_string().contains("HBNB_API_URL"));
    }

    #[test]
    fn test_socket_addr() {
        let config = WebConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            api: ApiConfig::new(DEFAULT_API_URL, Duration::from_secs(10)).unwrap(),
            static_dir: PathBuf::from("static"),
            sentry: SentryConfig::default(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 8000);
    }
}
