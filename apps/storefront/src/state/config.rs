//! # Store Configuration
//!
//! Branding, tax rate and catalog source, loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GROCERY_HUB_STORE_NAME="Corner Shop"                               │
//! │     GROCERY_HUB_TAX_RATE=8.25                                          │
//! │     GROCERY_HUB_CATALOG=/srv/shop/catalog.json                         │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     $GROCERY_HUB_CONFIG, or                                            │
//! │     ~/.config/grocery-hub/storefront.toml (Linux)                      │
//! │     ~/Library/Application Support/com.grocery-hub.storefront/… (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "Grocery Hub", 8% tax, built-in catalog                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # storefront.toml
//! store_name = "Corner Shop"
//! tax_rate_bps = 825
//! catalog_path = "/srv/shop/catalog.json"
//! ```
//!
//! Read-only after startup, so commands borrow it without locking.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use grocery_core::validation::validate_tax_rate_bps;
use grocery_core::{Catalog, OrderFormatter, TaxRate, DEFAULT_STORE_NAME, DEFAULT_TAX_RATE};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "GROCERY_HUB_CONFIG";
const STORE_NAME_ENV: &str = "GROCERY_HUB_STORE_NAME";
const TAX_RATE_ENV: &str = "GROCERY_HUB_TAX_RATE";
const CATALOG_ENV: &str = "GROCERY_HUB_CATALOG";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Shown in the message header and sign-off.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Sales tax in basis points, e.g. 825 = 8.25%.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// JSON catalog to load instead of the built-in one.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

fn default_tax_rate_bps() -> u32 {
    DEFAULT_TAX_RATE.bps()
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            store_name: default_store_name(),
            tax_rate_bps: default_tax_rate_bps(),
            catalog_path: None,
        }
    }
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`config_path`, `$GROCERY_HUB_CONFIG`, or the platform path)
    /// 3. Environment variables
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`load`](Self::load) with the environment read through `lookup`.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading store config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Parses a `storefront.toml` document. Missing keys take defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be blank".into()));
        }

        validate_tax_rate_bps(self.tax_rate_bps)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(())
    }

    /// Applies `GROCERY_HUB_*` overrides looked up through `lookup`.
    ///
    /// `load` passes the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(STORE_NAME_ENV) {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(rate) = lookup(TAX_RATE_ENV) {
            match rate.trim().parse::<f64>() {
                Ok(pct) if (0.0..=100.0).contains(&pct) => {
                    self.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                    debug!(tax_rate_bps = self.tax_rate_bps, "Overriding tax rate from environment");
                }
                _ => warn!(value = %rate, "Ignoring unusable tax rate in environment"),
            }
        }

        if let Some(path) = lookup(CATALOG_ENV) {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "grocery-hub", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the configured tax rate.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }

    /// The formatter every preview, share and checkout goes through.
    pub fn formatter(&self) -> OrderFormatter {
        OrderFormatter::new(self.store_name.clone(), self.tax_rate())
    }

    /// Loads the configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> ConfigResult<Catalog> {
        match &self.catalog_path {
            Some(path) => load_catalog_file(path),
            None => Ok(Catalog::builtin()),
        }
    }
}

fn load_catalog_file(path: &Path) -> ConfigResult<Catalog> {
    info!(?path, "Loading catalog from file");
    let json = std::fs::read_to_string(path)?;
    let catalog = Catalog::from_json(&json).map_err(|e| {
        ConfigError::Invalid(format!("catalog {}: {}", path.display(), e))
    })?;

    info!(
        categories = catalog.category_count(),
        products = catalog.product_count(),
        "Catalog loaded"
    );
    Ok(catalog)
}
