//! # boostline-core: Pure Pricing Logic for Boostline
//!
//! This crate is the **heart** of Boostline. It prices boosting orders
//! against tier tables and splits paid orders into booster jobs, as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Boostline Architecture                           │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────────────┐    │
//! │  │   Checkout route     │          │  Payment webhook handler     │    │
//! │  │   (prices, 400s)     │          │  (persists job records)      │    │
//! │  └──────────┬───────────┘          └──────────────┬───────────────┘    │
//! │             │ quote_checkout                       │ plan_fulfillment   │
//! │  ┌──────────▼──────────────────────────────────────▼───────────────┐   │
//! │  │                  boostline-core (THIS CRATE)                    │   │
//! │  │   TierTable ─► calculate_tiered_price ─► calculate_batches      │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────▲───────────────────────────────────┘   │
//! │                                │ BoostService values                    │
//! │  ┌─────────────────────────────┴───────────────────────────────────┐   │
//! │  │              boostline-catalog (catalog.toml + env)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer cents
//! - [`rate`] - Per-unit rates with sub-cent precision
//! - [`tiers`] - Validated tier tables and the shared overlap routine
//! - [`pricing`] - Tiered price calculation
//! - [`batch`] - Batch decomposition and per-batch payouts
//! - [`checkout`] - Checkout quotes
//! - [`fulfillment`] - Job planning for paid orders
//! - [`types`] - Domain types
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use boostline_core::{calculate_batches, calculate_tiered_price, PricingTier, TierTable};
//! use boostline_core::rate::UnitRate;
//!
//! let tiers = TierTable::new(vec![
//!     PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
//!     PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
//! ])
//! .unwrap();
//!
//! let priced = calculate_tiered_price(25, &tiers).unwrap();
//! let batches = calculate_batches(25, 10, &tiers).unwrap();
//!
//! let batch_total: i64 = batches.iter().map(|b| b.payout.cents()).sum();
//! assert_eq!(batch_total, priced.total_payout.cents()); // 42.50
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod batch;
pub mod checkout;
pub mod error;
pub mod fulfillment;
pub mod money;
pub mod pricing;
pub mod rate;
pub mod tiers;
pub mod types;
pub mod validation;

#[cfg(test)]
mod proptests;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use batch::{batch_count, calculate_batch_payout, calculate_batches};
pub use checkout::{quote_checkout, CheckoutQuote};
pub use error::{CoreError, CoreResult, TierTableError, ValidationError};
pub use fulfillment::{fulfillment_summary, plan_fulfillment, FulfillmentSummary};
pub use money::Money;
pub use pricing::{calculate_tiered_price, get_starting_price};
pub use rate::UnitRate;
pub use tiers::TierTable;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Units per job when a catalog does not set one.
pub const DEFAULT_BATCH_SIZE: i64 = 10;

/// Maximum length of a service slug.
pub const MAX_SLUG_LEN: usize = 64;

/// Maximum length of a service display name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a unit label ("win", "division").
pub const MAX_LABEL_LEN: usize = 32;
