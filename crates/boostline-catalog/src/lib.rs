//! # boostline-catalog: Service Catalog for Boostline
//!
//! Reads the catalog file, applies environment overrides and turns each
//! entry into a validated [`BoostService`](boostline_core::BoostService).
//! Broken tier tables are rejected here, at load time, never at checkout.
//!
//! ## Modules
//!
//! - [`config`] - Catalog file format and load order
//! - [`catalog`] - Validated services indexed by slug
//! - [`error`] - Catalog error types
//!
//! ## Example Usage
//!
//! ```rust
//! use boostline_catalog::{Catalog, CatalogConfig};
//!
//! let catalog = Catalog::from_config(&CatalogConfig::sample()).unwrap();
//! let quote = catalog.quote("ranked-wins", 15).unwrap();
//! assert_eq!(quote.line_item_amount_cents(), 7000);
//! ```

pub mod catalog;
pub mod config;
pub mod error;

pub use catalog::Catalog;
pub use config::{CatalogConfig, CurrencyConfig, DefaultsConfig, ServiceConfig, CATALOG_PATH_ENV};
pub use error::{CatalogError, CatalogResult};
