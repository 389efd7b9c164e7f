//! # Catalog Error Types
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────────┐  ┌────────────────────┐  │
//! │  │  Configuration  │  │      Services       │  │      Pricing       │  │
//! │  │                 │  │                     │  │                    │  │
//! │  │  LoadFailed     │  │  DuplicateService   │  │  Core(CoreError)   │  │
//! │  │  SaveFailed     │  │  InvalidService     │  │                    │  │
//! │  │  InvalidConfig  │  │  UnknownService     │  │                    │  │
//! │  └─────────────────┘  └─────────────────────┘  └────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use boostline_core::CoreError;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog error type.
#[derive(Debug, Error)]
pub enum CatalogError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to read or parse the catalog file.
    #[error("Failed to load catalog: {0}")]
    LoadFailed(String),

    /// Failed to write the catalog file.
    #[error("Failed to save catalog: {0}")]
    SaveFailed(String),

    /// A setting is missing or out of range.
    #[error("Invalid catalog configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Service Errors
    // =========================================================================
    /// Two services share a slug.
    #[error("Duplicate service slug: {0}")]
    DuplicateService(String),

    /// A service's limits or tier table failed validation.
    #[error("Service '{slug}' is invalid: {source}")]
    InvalidService {
        slug: String,
        #[source]
        source: CoreError,
    },

    /// No service with the requested slug.
    #[error("Unknown service: {0}")]
    UnknownService(String),

    // =========================================================================
    // Pricing Errors
    // =========================================================================
    /// A pricing or planning call was rejected by the core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<std::io::Error> for CatalogError {
    fn from(err: std::io::Error) -> Self {
        CatalogError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(err: toml::de::Error) -> Self {
        CatalogError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for CatalogError {
    fn from(err: toml::ser::Error) -> Self {
        CatalogError::SaveFailed(err.to_string())
    }
}
