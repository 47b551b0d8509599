//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `LM_HOST` - Bind address (default: 127.0.0.1)
//! - `LM_PORT` - Listen port (default: 3000)
//! - `LM_BASE_URL` - Public URL for the storefront (default: `http://localhost:3000`)
//! - `LM_LOCALE` - Number formatting locale, `es-ES` or `en-US` (default: es-ES)
//! - `LM_CURRENCY` - Display currency, `EUR`, `USD` or `GBP` (default: EUR)
//! - `LM_PRODUCT_ORDER` - Comma-separated product ids for the grid
//! - `LM_CATALOG_PATH` - JSON catalog replacing the built-in products
//! - `LM_STATIC_DIR` - Static asset directory (default: crates/storefront/static)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use legumechanics_core::{CurrencyCode, Locale, MoneyFormatter, ProductOrder};
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: Url,
    /// Money formatting for every displayed amount
    pub money: MoneyFormatter,
    /// Display order of the product grid
    pub product_order: ProductOrder,
    /// Optional catalog file; the built-in catalog is used when unset
    pub catalog_path: Option<PathBuf>,
    /// Static asset directory served under `/static`
    pub static_dir: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_STATIC_DIR: &str = "crates/storefront/static";

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host = parse_var("LM_HOST", &get_or("LM_HOST", "127.0.0.1"))?;
        let port = parse_var("LM_PORT", &get_or("LM_PORT", "3000"))?;
        let base_url = parse_var("LM_BASE_URL", &get_or("LM_BASE_URL", DEFAULT_BASE_URL))?;
        let locale: Locale = parse_var("LM_LOCALE", &get_or("LM_LOCALE", "es-ES"))?;
        let currency: CurrencyCode = parse_var("LM_CURRENCY", &get_or("LM_CURRENCY", "EUR"))?;

        let product_order = match lookup("LM_PRODUCT_ORDER") {
            Some(list) => parse_var("LM_PRODUCT_ORDER", &list)?,
            None => ProductOrder::default(),
        };

        Ok(Self {
            host,
            port,
            base_url,
            money: MoneyFormatter::new(locale, currency),
            product_order,
            catalog_path: lookup("LM_CATALOG_PATH").map(PathBuf::from),
            static_dir: PathBuf::from(get_or("LM_STATIC_DIR", DEFAULT_STATIC_DIR)),
            sentry_dsn: lookup("SENTRY_DSN"),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` flag.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.scheme() == "https"
    }
}

/// Parse a variable value, naming the variable on failure.
fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use legumechanics_core::ProductId;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.money, MoneyFormatter::new(Locale::EsEs, CurrencyCode::EUR));
        assert_eq!(config.product_order, ProductOrder::default());
        assert!(config.catalog_path.is_none());
        assert!(!config.is_secure());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("LM_PORT", "8080"),
            ("LM_BASE_URL", "https://legumechanics.es"),
            ("LM_LOCALE", "en-US"),
            ("LM_CURRENCY", "usd"),
            ("LM_PRODUCT_ORDER", "energy-bar, pea-protein"),
            ("LM_CATALOG_PATH", "/etc/lm/catalog.json"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.is_secure());
        assert_eq!(config.money.locale(), Locale::EnUs);
        assert_eq!(config.money.currency(), CurrencyCode::USD);
        assert_eq!(
            config.product_order,
            ProductOrder::new(vec![ProductId::new("energy-bar"), ProductId::new("pea-protein")])
        );
        assert_eq!(config.catalog_path, Some(PathBuf::from("/etc/lm/catalog.json")));
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("LM_PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "LM_PORT"));
    }

    #[test]
    fn test_invalid_locale() {
        let err = load(&[("LM_LOCALE", "fr-FR")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid environment variable LM_LOCALE: unsupported locale: fr-FR"
        );
    }
}
