//! # Storefront Configuration
//!
//! Settings for a storefront session, loaded from TOML and the environment.
//!
//! ## Load Order (later overrides earlier)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Defaults           StorefrontConfig::default()                      │
//! │  2. Config file        $SATCHEL_CONFIG or <config dir>/satchel.toml     │
//! │  3. Environment        SATCHEL_CATALOG_PATH, SATCHEL_TAX_RATE_BPS,      │
//! │                        SATCHEL_FREE_SHIPPING_CENTS,                     │
//! │                        SATCHEL_FLAT_SHIPPING_CENTS,                     │
//! │                        SATCHEL_HISTORY_LIMIT                            │
//! │  4. validate()                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example `satchel.toml`
//! ```toml
//! [store]
//! name = "Satchel"
//! catalog_path = "/srv/satchel/catalog.json"
//!
//! [pricing]
//! tax_rate_bps = 800
//! free_shipping_threshold_cents = 15000
//! flat_shipping_cents = 1500
//!
//! [session]
//! history_limit = 50
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use satchel_core::validation::validate_tax_rate_bps;
use satchel_core::{Money, PricingPolicy, TaxRate, DEFAULT_HISTORY_LIMIT};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "SATCHEL_CONFIG";

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Store identity and catalog source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// JSON catalog to load. The embedded seed catalog is used when unset.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            catalog_path: None,
        }
    }
}

/// Tax and shipping, in basis points and cents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingSettings {
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    #[serde(default = "default_free_shipping_threshold_cents")]
    pub free_shipping_threshold_cents: i64,

    #[serde(default = "default_flat_shipping_cents")]
    pub flat_shipping_cents: i64,
}

impl Default for PricingSettings {
    fn default() -> Self {
        PricingSettings {
            tax_rate_bps: default_tax_rate_bps(),
            free_shipping_threshold_cents: default_free_shipping_threshold_cents(),
            flat_shipping_cents: default_flat_shipping_cents(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Undo steps kept per session.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            history_limit: default_history_limit(),
        }
    }
}

fn default_store_name() -> String {
    "Satchel".to_string()
}

fn default_tax_rate_bps() -> u32 {
    800
}

fn default_free_shipping_threshold_cents() -> i64 {
    15000
}

fn default_flat_shipping_cents() -> i64 {
    1500
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

// =============================================================================
// Storefront Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub pricing: PricingSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// With no explicit path, `$SATCHEL_CONFIG` is tried first, then the
    /// platform config directory. A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let path = config_path
            .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        let mut config = match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path)?;
                Self::from_toml_str(&contents)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// `<platform config dir>/satchel.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "satchel", "storefront")
            .map(|dirs| dirs.config_dir().join("satchel.toml"))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        validate_tax_rate_bps(self.pricing.tax_rate_bps)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        if self.pricing.free_shipping_threshold_cents < 0 {
            return Err(ConfigError::InvalidValue(
                "free_shipping_threshold_cents must not be negative".into(),
            ));
        }

        if self.pricing.flat_shipping_cents < 0 {
            return Err(ConfigError::InvalidValue(
                "flat_shipping_cents must not be negative".into(),
            ));
        }

        if self.session.history_limit == 0 {
            return Err(ConfigError::InvalidValue(
                "history_limit must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `SATCHEL_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("SATCHEL_CATALOG_PATH") {
            debug!(catalog_path = %path, "Overriding catalog path from environment");
            self.store.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(bps) = lookup("SATCHEL_TAX_RATE_BPS") {
            self.pricing.tax_rate_bps = bps
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SATCHEL_TAX_RATE_BPS".to_string()))?;
            debug!(bps = self.pricing.tax_rate_bps, "Overriding tax rate from environment");
        }

        if let Some(cents) = lookup("SATCHEL_FREE_SHIPPING_CENTS") {
            self.pricing.free_shipping_threshold_cents = cents.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("SATCHEL_FREE_SHIPPING_CENTS".to_string())
            })?;
        }

        if let Some(cents) = lookup("SATCHEL_FLAT_SHIPPING_CENTS") {
            self.pricing.flat_shipping_cents = cents.trim().parse().map_err(|_| {
                ConfigError::InvalidValue("SATCHEL_FLAT_SHIPPING_CENTS".to_string())
            })?;
        }

        if let Some(limit) = lookup("SATCHEL_HISTORY_LIMIT") {
            self.session.history_limit = limit
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SATCHEL_HISTORY_LIMIT".to_string()))?;
        }

        Ok(())
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The pricing section as the core's policy type.
    pub fn pricing_policy(&self) -> PricingPolicy {
        PricingPolicy {
            tax_rate: TaxRate::from_bps(self.pricing.tax_rate_bps),
            free_shipping_threshold: Money::from_cents(
                self.pricing.free_shipping_threshold_cents,
            ),
            flat_shipping: Money::from_cents(self.pricing.flat_shipping_cents),
        }
    }

    pub fn history_limit(&self) -> usize {
        self.session.history_limit
    }

    pub fn catalog_path(&self) -> Option<&PathBuf> {
        self.store.catalog_path.as_ref()
    }
}
