//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MITTENS_PREMIUM` - Whether the customer has premium (free) shipping
//!
//! ## Optional
//! - `MITTENS_HOST` - Bind address (default: 127.0.0.1)
//! - `MITTENS_PORT` - Listen port (default: 3000)
//! - `MITTENS_MOUNT_ID` - Element id the widget renders into (default: app)
//! - `MITTENS_CATALOG` - Path to a JSON product catalog (default: built-in mittens)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use mittens_core::{CatalogError, ProductCatalog};
use thiserror::Error;

const DEFAULT_MOUNT_ID: &str = "app";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to read catalog {0}: {1}")]
    CatalogRead(PathBuf, std::io::Error),
    #[error("Invalid catalog {0}: {1}")]
    Catalog(PathBuf, CatalogError),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Premium customers ship for free
    pub premium: bool,
    /// Id of the page element the widget mounts into
    pub mount_id: String,
    /// Optional catalog file; the built-in product is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let host = env
            .get_or_default("MITTENS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MITTENS_HOST".to_string(), e.to_string()))?;
        let port = env
            .get_or_default("MITTENS_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MITTENS_PORT".to_string(), e.to_string()))?;
        let premium = parse_bool("MITTENS_PREMIUM", &env.get_required("MITTENS_PREMIUM")?)?;
        let mount_id = env.get_or_default("MITTENS_MOUNT_ID", DEFAULT_MOUNT_ID);
        if mount_id.is_empty() || mount_id.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidEnvVar(
                "MITTENS_MOUNT_ID".to_string(),
                "must be a non-empty id without whitespace".to_string(),
            ));
        }

        Ok(Self {
            host,
            port,
            premium,
            mount_id,
            catalog_path: env.get_optional("MITTENS_CATALOG").map(PathBuf::from),
            sentry_dsn: env.get_optional("SENTRY_DSN"),
            sentry_environment: env.get_optional("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Load the product catalog this storefront displays.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configured catalog file cannot be read or
    /// does not describe a valid product.
    pub fn load_catalog(&self) -> Result<ProductCatalog, ConfigError> {
        let Some(path) = &self.catalog_path else {
            return Ok(ProductCatalog::mittens());
        };

        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::CatalogRead(path.clone(), e))?;
        ProductCatalog::from_json(&json).map_err(|e| ConfigError::Catalog(path.clone(), e))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get a required variable.
    fn get_required(&self, key: &str) -> Result<String, ConfigError> {
        (self.0)(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable; empty values count as unset.
    fn get_optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.is_empty())
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse a boolean flag.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_premium_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "MITTENS_PREMIUM"));
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("MITTENS_PREMIUM", "false")]).unwrap();
        assert!(!config.premium);
        assert_eq!(config.mount_id, "app");
        assert!(config.catalog_path.is_none());
        assert!(config.sentry_dsn.is_none());

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("MITTENS_PREMIUM", "yes"),
            ("MITTENS_HOST", "0.0.0.0"),
            ("MITTENS_PORT", "8080"),
            ("MITTENS_MOUNT_ID", "shop"),
            ("SENTRY_DSN", ""),
        ])
        .unwrap();
        assert!(config.premium);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.mount_id, "shop");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load(&[("MITTENS_PREMIUM", "sometimes")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(matches!(
            load(&[("MITTENS_PREMIUM", "true"), ("MITTENS_PORT", "http")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "MITTENS_PORT"
        ));
        assert!(matches!(
            load(&[("MITTENS_PREMIUM", "true"), ("MITTENS_MOUNT_ID", "my app")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "MITTENS_MOUNT_ID"
        ));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("K", "TRUE").unwrap());
        assert!(parse_bool("K", "1").unwrap());
        assert!(!parse_bool("K", "off").unwrap());
        assert!(parse_bool("K", "").is_err());
    }

    #[test]
    fn test_default_catalog() {
        let config = load(&[("MITTENS_PREMIUM", "false")]).unwrap();
        assert_eq!(config.load_catalog().unwrap(), ProductCatalog::mittens());
    }

    #[test]
    fn test_missing_catalog_file() {
        let config = load(&[
            ("MITTENS_PREMIUM", "false"),
            ("MITTENS_CATALOG", "/nonexistent/catalog.json"),
        ])
        .unwrap();
        assert!(matches!(
            config.load_catalog(),
            Err(ConfigError::CatalogRead(_, _))
        ));
    }
}
