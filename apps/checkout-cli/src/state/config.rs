//! # Checkout Configuration
//!
//! ## Configuration Sources (Priority Order)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  1. Environment variables (CHECKOUT_*)             ◄── highest         │
//! │  2. Config file                                                        │
//! │     ~/.config/cart/checkout.toml (Linux)                               │
//! │     ~/Library/Application Support/com.checkout.cart/checkout.toml      │
//! │  3. Defaults (this file)                           ◄── lowest          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```toml
//! # checkout.toml
//! [catalog]
//! path = "data/catalog.json"
//! latency_ms = 1500
//!
//! [storage]
//! data_dir = "/var/lib/checkout"
//! quota_bytes = 5242880
//!
//! [display]
//! currency_symbol = "₹"
//! currency_decimals = 2
//!
//! [logging]
//! filter = "info,checkout=debug"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use checkout_core::Money;
use checkout_store::{FileStore, STORAGE_QUOTA_BYTES};

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Catalog JSON file.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,

    /// Simulated fetch delay in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("data/catalog.json")
}

fn default_latency_ms() -> u64 {
    1500
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            path: default_catalog_path(),
            latency_ms: default_latency_ms(),
        }
    }
}

/// Where the saved cart lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Data directory. `None` uses the platform data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Snapshot size ceiling in bytes.
    #[serde(default = "default_quota_bytes")]
    pub quota_bytes: usize,
}

fn default_quota_bytes() -> usize {
    STORAGE_QUOTA_BYTES
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_dir: None,
            quota_bytes: default_quota_bytes(),
        }
    }
}

/// How amounts are rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    #[serde(default = "default_currency_decimals")]
    pub currency_decimals: u8,
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_currency_decimals() -> u8 {
    2
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: default_currency_symbol(),
            currency_decimals: default_currency_decimals(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing-subscriber` filter directive. `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,checkout=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`checkout.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(ConfigError::Invalid(format!(
                    "config file not found: {}",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.catalog.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("catalog.path must not be empty".into()));
        }

        if self.storage.quota_bytes == 0 {
            return Err(ConfigError::Invalid(
                "storage.quota_bytes must be greater than 0".into(),
            ));
        }

        if self.display.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "display.currency_decimals must be between 0 and 4".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `CHECKOUT_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("CHECKOUT_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog.path = PathBuf::from(path);
        }

        if let Some(latency) = lookup("CHECKOUT_CATALOG_LATENCY_MS") {
            match latency.parse::<u64>() {
                Ok(ms) => self.catalog.latency_ms = ms,
                Err(_) => warn!(value = %latency, "Ignoring non-numeric CHECKOUT_CATALOG_LATENCY_MS"),
            }
        }

        if let Some(dir) = lookup("CHECKOUT_DATA_DIR") {
            debug!(dir = %dir, "Overriding data directory from environment");
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(filter) = lookup("CHECKOUT_LOG") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "cart")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn catalog_latency(&self) -> Duration {
        Duration::from_millis(self.catalog.latency_ms)
    }

    /// Resolved data directory: configured, else platform, else `./data`.
    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .data_dir
            .clone()
            .or_else(FileStore::default_dir)
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Formats a cent amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_cli::state::CheckoutConfig;
    ///
    /// let config = CheckoutConfig::default();
    /// assert_eq!(config.format_currency(187_500), "₹1875.00");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let decimals = u32::from(self.display.currency_decimals);
        let sign = if cents < 0 { "-" } else { "" };
        let cents = cents.unsigned_abs();

        // Amounts are stored in hundredths; rescale to the display precision.
        let scaled = match decimals {
            0 => (cents + 50) / 100,
            1 => (cents + 5) / 10,
            2 => cents,
            d => cents * 10_u64.pow(d - 2),
        };

        if decimals == 0 {
            return format!("{}{}{}", sign, self.display.currency_symbol, scaled);
        }

        let divisor = 10_u64.pow(decimals);
        format!(
            "{}{}{}.{:0width$}",
            sign,
            self.display.currency_symbol,
            scaled / divisor,
            scaled % divisor,
            width = decimals as usize
        )
    }

    pub fn format_money(&self, amount: Money) -> String {
        self.format_currency(amount.cents())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::default();
        assert_eq!(config.catalog.path, PathBuf::from("data/catalog.json"));
        assert_eq!(config.catalog_latency(), Duration::from_millis(1500));
        assert_eq!(config.storage.quota_bytes, 5 * 1024 * 1024);
        assert_eq!(config.logging.filter, "info,checkout=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CheckoutConfig = toml::from_str(
            r#"
            [catalog]
            latency_ms = 0

            [display]
            currency_symbol = "$"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.latency_ms, 0);
        assert_eq!(config.catalog.path, PathBuf::from("data/catalog.json"));
        assert_eq!(config.display.currency_symbol, "$");
        assert_eq!(config.display.currency_decimals, 2);
        assert_eq!(config.storage, StorageSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("CHECKOUT_CATALOG_PATH", "/srv/catalog.json"),
            ("CHECKOUT_CATALOG_LATENCY_MS", "25"),
            ("CHECKOUT_DATA_DIR", "/tmp/cart"),
            ("CHECKOUT_LOG", "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = CheckoutConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.catalog.path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.catalog.latency_ms, 25);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/cart"));
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_bad_latency_override_is_ignored() {
        let mut config = CheckoutConfig::default();
        config.apply_overrides(|key| {
            (key == "CHECKOUT_CATALOG_LATENCY_MS").then(|| "soon".to_string())
        });
        assert_eq!(config.catalog.latency_ms, 1500);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = CheckoutConfig::default();
        config.storage.quota_bytes = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = CheckoutConfig::default();
        config.catalog.path = PathBuf::new();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("checkout-config-that-does-not-exist.toml");
        assert!(CheckoutConfig::load(Some(path)).is_err());
    }

    #[test]
    fn test_format_currency() {
        let config = CheckoutConfig::default();
        assert_eq!(config.format_currency(187_500), "₹1875.00");
        assert_eq!(config.format_currency(1), "₹0.01");
        assert_eq!(config.format_currency(0), "₹0.00");
        assert_eq!(config.format_currency(-1234), "-₹12.34");
    }

    #[test]
    fn test_format_currency_other_precisions() {
        let mut config = CheckoutConfig::default();
        config.display.currency_symbol = "$".into();

        config.display.currency_decimals = 0;
        assert_eq!(config.format_currency(1_250), "$13");

        config.display.currency_decimals = 3;
        assert_eq!(config.format_currency(1_250), "$12.500");
    }
}
