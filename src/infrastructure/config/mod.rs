//! Configuration management

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::application::errors::ConfigError;
use crate::application::services::cart_service::CART_KEY;
use crate::application::services::catalog_service::DEFAULT_PAGE_SIZE;
use crate::application::services::form_service::default_placeholder_price;
use crate::infrastructure::api::retry::{BackoffStrategy, RetryPolicy};

/// Default product API location
pub const DEFAULT_BASE_URL: &str = "https://radshopserver-v1.onrender.com/api/products";

/// Storefront configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub form: FormConfig,
    pub storage: StorageConfig,
    /// Refetch products after a successful create/update/delete
    pub refresh_after_mutation: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiConfig {
    pub base_url: String,
    /// No timeout when unset
    pub timeout_seconds: Option<u64>,
    pub retry: RetryConfig,
}

/// Retry settings for idempotent reads
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct CatalogConfig {
    pub page_size: usize,
    pub default_category: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FormConfig {
    #[serde(with = "rust_decimal::serde::float")]
    pub placeholder_price: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Json,
    Sqlite,
}

impl std::str::FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            other => Err(ConfigError::InvalidValue(format!("unknown storage backend '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub data_dir: PathBuf,
    pub cart_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                timeout_seconds: None,
                retry: RetryConfig {
                    max_attempts: 2,
                    base_delay_ms: 200,
                    max_delay_ms: 2000,
                },
            },
            catalog: CatalogConfig {
                page_size: DEFAULT_PAGE_SIZE,
                default_category: "Entrée".to_string(),
            },
            form: FormConfig {
                placeholder_price: default_placeholder_price(),
            },
            storage: StorageConfig {
                backend: StorageBackend::Json,
                data_dir: PathBuf::from(".radshop"),
                cart_key: CART_KEY.to_string(),
            },
            refresh_after_mutation: true,
        }
    }
}

impl Config {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .map_err(|e| ConfigError::Parse(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied
    pub fn load_env() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Apply `RADSHOP_*` environment overrides on top of this config
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("RADSHOP_BASE_URL") {
            self.api.base_url = url;
        }

        if let Ok(dir) = std::env::var("RADSHOP_DATA_DIR") {
            self.storage.data_dir = PathBuf::from(dir);
        }

        if let Ok(backend) = std::env::var("RADSHOP_STORAGE") {
            match backend.parse() {
                Ok(b) => self.storage.backend = b,
                Err(e) => tracing::warn!("Ignoring RADSHOP_STORAGE: {}", e),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.page_size == 0 {
            return Err(ConfigError::InvalidValue("catalog.page-size must be at least 1".to_string()));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue("api.base-url is empty".to_string()));
        }
        if self.storage.cart_key.is_empty() {
            return Err(ConfigError::InvalidValue("storage.cart-key is empty".to_string()));
        }
        Ok(())
    }

    /// Write this config as YAML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_seconds.map(Duration::from_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        let retry = &self.api.retry;
        RetryPolicy::new(retry.max_attempts).with_backoff(BackoffStrategy::Exponential {
            base: Duration::from_millis(retry.base_delay_ms),
            max: Duration::from_millis(retry.max_delay_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.page_size, 8);
        assert_eq!(config.storage.cart_key, "cartItems");
        assert_eq!(config.form.placeholder_price, Decimal::new(999, 2));
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
api:
  base-url: http://localhost:5000/api/products
  timeout-seconds: 10
  retry:
    max-attempts: 0
    base-delay-ms: 10
    max-delay-ms: 10
catalog:
  page-size: 4
  default-category: Plat
form:
  placeholder-price: 5.5
storage:
  backend: sqlite
  data-dir: /tmp/radshop
  cart-key: cartItems
refresh-after-mutation: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:5000/api/products");
        assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
        assert_eq!(config.catalog.page_size, 4);
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.form.placeholder_price, Decimal::new(55, 1));
        assert!(!config.refresh_after_mutation);
        assert_eq!(config.retry_policy().max_attempts, 0);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = Config::default();
        config.catalog.page_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("SQLite".parse::<StorageBackend>().unwrap(), StorageBackend::Sqlite);
        assert!("redis".parse::<StorageBackend>().is_err());
    }
}
