//! # Catalog Configuration
//!
//! File format and load order for the service catalog.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BOOSTLINE_CURRENCY_CODE=EUR                                        │
//! │     BOOSTLINE_DEFAULT_BATCH_SIZE=5                                     │
//! │                                                                         │
//! │  2. TOML Catalog File                                                  │
//! │     --catalog PATH, else $BOOSTLINE_CATALOG, else                      │
//! │     ~/.config/boostline/catalog.toml (Linux)                           │
//! │     ~/Library/Application Support/com.boostline.boostline/ (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     USD, batch size 10, no services                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Catalog File Format
//! ```toml
//! [currency]
//! code = "USD"
//! symbol = "$"
//!
//! [defaults]
//! batch_size = 10
//!
//! [[services]]
//! slug = "ranked-wins"
//! name = "Ranked Wins"
//! unit_label = "win"
//! max_quantity = 30
//!
//! [[services.tiers]]
//! min_quantity = 1
//! max_quantity = 10
//! price_per_unit = "5.00"
//! booster_payout_per_unit = "2.00"
//! ```

use std::path::{Path, PathBuf};

use boostline_core::{PricingTier, UnitRate, DEFAULT_BATCH_SIZE};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CatalogError, CatalogResult};

/// Environment variable naming the catalog file.
pub const CATALOG_PATH_ENV: &str = "BOOSTLINE_CATALOG";

// =============================================================================
// Currency
// =============================================================================

/// Currency the catalog is priced in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyConfig {
    /// ISO 4217 code, e.g. "USD".
    #[serde(default = "default_currency_code")]
    pub code: String,

    /// Symbol used in display strings.
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
}

fn default_currency_code() -> String {
    "USD".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        CurrencyConfig {
            code: default_currency_code(),
            symbol: default_currency_symbol(),
        }
    }
}

// =============================================================================
// Defaults
// =============================================================================

/// Values applied to services that leave them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Units per fulfillment job.
    #[serde(default = "default_batch_size")]
    pub batch_size: i64,
}

fn default_batch_size() -> i64 {
    DEFAULT_BATCH_SIZE
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        DefaultsConfig {
            batch_size: default_batch_size(),
        }
    }
}

// =============================================================================
// Services
// =============================================================================

/// One service entry as written in the catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub slug: String,

    pub name: String,

    /// What one unit is called.
    #[serde(default = "default_unit_label")]
    pub unit_label: String,

    #[serde(default = "default_min_quantity")]
    pub min_quantity: i64,

    /// Defaults to the top of the tier table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_quantity: Option<i64>,

    /// Overrides `[defaults].batch_size`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<i64>,

    /// One job per order regardless of quantity.
    #[serde(default, skip_serializing_if = "is_false")]
    pub unbatched: bool,

    #[serde(default)]
    pub tiers: Vec<PricingTier>,
}

fn default_unit_label() -> String {
    "unit".to_string()
}

fn default_min_quantity() -> i64 {
    1
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ServiceConfig {
    /// Batch size after applying catalog defaults. `None` means unbatched.
    pub fn effective_batch_size(&self, defaults: &DefaultsConfig) -> Option<i64> {
        if self.unbatched {
            None
        } else {
            Some(self.batch_size.unwrap_or(defaults.batch_size))
        }
    }
}

// =============================================================================
// Catalog Configuration
// =============================================================================

/// Complete catalog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub currency: CurrencyConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub services: Vec<ServiceConfig>,
}

impl CatalogConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Catalog file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| std::env::var(CATALOG_PATH_ENV).ok().map(PathBuf::from))
            .or_else(Self::default_config_path);

        match path {
            Some(path) if path.exists() => {
                info!(?path, "Loading catalog from file");
                config = Self::from_file(&path)?;
            }
            Some(path) => {
                warn!(?path, "Catalog file not found, starting with no services");
            }
            None => {
                warn!("No catalog path available, starting with no services");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses a catalog file without env overrides.
    pub fn from_file(path: &Path) -> CatalogResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Parses catalog TOML.
    pub fn from_toml_str(contents: &str) -> CatalogResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Writes the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CatalogError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents).map_err(|e| CatalogError::SaveFailed(e.to_string()))?;

        info!(path = %path.display(), "Catalog saved");
        Ok(())
    }

    /// Checks catalog-level settings.
    ///
    /// Per-service limits and tier tables are validated by the core when
    /// the catalog is built.
    pub fn validate(&self) -> CatalogResult<()> {
        let code = &self.currency.code;
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CatalogError::InvalidConfig(format!(
                "currency code must be three uppercase letters, got '{}'",
                self.currency.code
            )));
        }

        if self.defaults.batch_size <= 0 {
            return Err(CatalogError::InvalidConfig(
                "defaults.batch_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `BOOSTLINE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key/value source.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup("BOOSTLINE_CURRENCY_CODE") {
            debug!(code = %code, "Overriding currency code from environment");
            self.currency.code = code.to_uppercase();
        }

        if let Some(symbol) = lookup("BOOSTLINE_CURRENCY_SYMBOL") {
            self.currency.symbol = symbol;
        }

        if let Some(size) = lookup("BOOSTLINE_DEFAULT_BATCH_SIZE") {
            match size.parse::<i64>() {
                Ok(size) => {
                    debug!(batch_size = size, "Overriding default batch size from environment");
                    self.defaults.batch_size = size;
                }
                Err(_) => warn!(value = %size, "Ignoring non-numeric BOOSTLINE_DEFAULT_BATCH_SIZE"),
            }
        }
    }

    /// Returns the default catalog file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "boostline", "boostline")
            .map(|dirs| dirs.config_dir().join("catalog.toml"))
    }

    /// A small working catalog, written by `boostline-quote init`.
    pub fn sample() -> Self {
        let rate = UnitRate::from_cents;
        CatalogConfig {
            currency: CurrencyConfig::default(),
            defaults: DefaultsConfig::default(),
            services: vec![
                ServiceConfig {
                    slug: "ranked-wins".to_string(),
                    name: "Ranked Wins".to_string(),
                    unit_label: "win".to_string(),
                    min_quantity: 1,
                    max_quantity: Some(30),
                    batch_size: Some(10),
                    unbatched: false,
                    tiers: vec![
                        PricingTier::new(1, 10, rate(500), rate(200)),
                        PricingTier::new(11, 30, rate(400), rate(150)),
                    ],
                },
                ServiceConfig {
                    slug: "placement-matches".to_string(),
                    name: "Placement Matches".to_string(),
                    unit_label: "match".to_string(),
                    min_quantity: 1,
                    max_quantity: Some(10),
                    batch_size: None,
                    unbatched: true,
                    tiers: vec![PricingTier::new(1, 10, rate(800), rate(350))],
                },
            ],
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const CATALOG: &str = r#"
[currency]
code = "USD"
symbol = "$"

[defaults]
batch_size = 5

[[services]]
slug = "ranked-wins"
name = "Ranked Wins"
unit_label = "win"
max_quantity = 30

[[services.tiers]]
min_quantity = 1
max_quantity = 10
price_per_unit = "5.00"
booster_payout_per_unit = "2.00"

[[services.tiers]]
min_quantity = 11
max_quantity = 30
price_per_unit = "4.00"
booster_payout_per_unit = "1.50"
"#;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("boostline-{}", uuid::Uuid::new_v4()))
            .join("catalog.toml")
    }

    #[test]
    fn test_parse_catalog() {
        let config = CatalogConfig::from_toml_str(CATALOG).unwrap();
        assert_eq!(config.currency.code, "USD");
        assert_eq!(config.services.len(), 1);

        let service = &config.services[0];
        assert_eq!(service.min_quantity, 1);
        assert_eq!(service.max_quantity, Some(30));
        assert_eq!(service.tiers[1].booster_payout_per_unit, UnitRate::from_cents(150));
        assert_eq!(service.effective_batch_size(&config.defaults), Some(5));
    }

    #[test]
    fn test_parse_rejects_float_rates() {
        let bad = CATALOG.replace("\"5.00\"", "5.0");
        assert!(matches!(
            CatalogConfig::from_toml_str(&bad).unwrap_err(),
            CatalogError::LoadFailed(_)
        ));
    }

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::from_toml_str("").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.defaults.batch_size, DEFAULT_BATCH_SIZE);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unbatched_service() {
        let config = CatalogConfig::sample();
        let placements = &config.services[1];
        assert!(placements.unbatched);
        assert_eq!(placements.effective_batch_size(&config.defaults), None);
    }

    #[test]
    fn test_validation() {
        let mut config = CatalogConfig::default();
        config.currency.code = "usd".to_string();
        assert!(config.validate().is_err());

        config.currency.code = "EUR".to_string();
        config.defaults.batch_size = 0;
        assert!(config.validate().is_err());

        config.defaults.batch_size = 3;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("BOOSTLINE_CURRENCY_CODE", "eur"),
            ("BOOSTLINE_CURRENCY_SYMBOL", "€"),
            ("BOOSTLINE_DEFAULT_BATCH_SIZE", "4"),
        ]
        .into_iter()
        .collect();

        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.currency.code, "EUR");
        assert_eq!(config.currency.symbol, "€");
        assert_eq!(config.defaults.batch_size, 4);
    }

    #[test]
    fn test_bad_batch_size_override_is_ignored() {
        let mut config = CatalogConfig::default();
        config.apply_overrides(|key| {
            (key == "BOOSTLINE_DEFAULT_BATCH_SIZE").then(|| "ten".to_string())
        });
        assert_eq!(config.defaults.batch_size, DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path();
        let sample = CatalogConfig::sample();
        sample.save(&path).unwrap();

        let reloaded = CatalogConfig::from_file(&path).unwrap();
        assert_eq!(reloaded, sample);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[[services]]"));
        assert!(contents.contains("price_per_unit = \"5.00\""));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let path = temp_path();
        assert!(matches!(
            CatalogConfig::from_file(&path).unwrap_err(),
            CatalogError::LoadFailed(_)
        ));
    }
}
