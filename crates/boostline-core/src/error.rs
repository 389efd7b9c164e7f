//! # Error Types
//!
//! Domain-specific error types for boostline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  boostline-core errors (this file)                                     │
//! │  ├── CoreError        - Pricing and planning failures                  │
//! │  ├── TierTableError   - Malformed or insufficient tier tables          │
//! │  └── ValidationError  - Field-level input validation failures          │
//! │                                                                         │
//! │  boostline-catalog errors (separate crate)                             │
//! │  └── CatalogError     - Catalog file / environment failures            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller (HTTP 400, webhook abort)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages name the offending quantity or unit range. No failure is ever
//! reported as a zero price.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing and fulfillment planning errors.
///
/// The checkout route and the payment webhook must abort the financial
/// operation when they receive one of these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A quantity, batch size or unit range is outside what the operation
    /// accepts.
    ///
    /// ## When This Occurs
    /// - `calculate_batches` with `batch_size <= 0` or `total_quantity <= 0`
    /// - `calculate_tiered_price` with a negative quantity
    /// - `calculate_batch_payout` with `end_unit < start_unit`
    /// - An order quantity outside the service's limits
    #[error("Invalid {field}: {reason}")]
    InvalidArgument { field: String, reason: String },

    /// The tier table is malformed or does not cover the requested units.
    #[error("Invalid tier table: {0}")]
    InvalidTierTable(#[from] TierTableError),

    /// An order was routed to a service it was not placed for.
    #[error("Order is for service '{actual}', not '{expected}'")]
    ServiceMismatch { expected: String, actual: String },

    /// A service or order field failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for [`CoreError::InvalidArgument`].
    pub fn invalid_argument(field: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Tier Table Error
// =============================================================================

/// Ways a tier table can fail to describe a contiguous price schedule.
///
/// ## Table Shape
/// ```text
///   unit:  1 ........ 10 | 11 ............ 30
///          └─ tier A ──┘   └──── tier B ───┘
///
///   Gap:      A = 1-10,  B = 12-30   (unit 11 unpriced)
///   Overlap:  A = 1-10,  B = 10-30   (unit 10 priced twice)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TierTableError {
    /// No tiers at all.
    #[error("tier table is empty")]
    Empty,

    /// The lowest tier must start at unit 1.
    #[error("first tier starts at unit {min_quantity}, expected 1")]
    DoesNotStartAtOne { min_quantity: i64 },

    /// A tier whose upper bound is below its lower bound.
    #[error("tier {min_quantity}-{max_quantity} has an inverted range")]
    InvertedRange { min_quantity: i64, max_quantity: i64 },

    /// Units between two consecutive tiers belong to no tier.
    #[error("no tier covers units {first_missing}-{last_missing}")]
    Gap {
        first_missing: i64,
        last_missing: i64,
    },

    /// Two consecutive tiers both claim the same units.
    #[error("tiers overlap at units {first_shared}-{last_shared}")]
    Overlap { first_shared: i64, last_shared: i64 },

    /// The table ends before the requested unit.
    #[error("quantity {quantity} exceeds the highest tier (covers up to {max_covered})")]
    DoesNotCover { quantity: i64, max_covered: i64 },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised on field values before any arithmetic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, malformed decimal).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result alias used by every fallible core operation.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
