//! # Validation Module
//!
//! Input validation for quantities, batch sizes and service fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Checkout form / webhook payload                              │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── quantities and batch sizes are positive                           │
//! │  └── ids, slugs and labels are well formed                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: TierTable / BoostService constructors                        │
//! │  └── structural invariants (coverage, contiguity)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use boostline_core::validation::{validate_quantity, validate_batch_size};
//!
//! validate_quantity(15).unwrap();
//! assert!(validate_batch_size(0).is_err());
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::{MAX_LABEL_LEN, MAX_NAME_LEN, MAX_SLUG_LEN};

/// Result type for field validation.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested unit quantity (must be > 0).
///
/// Reported as `InvalidArgument` so callers can map it straight to a 400.
pub fn validate_quantity(quantity: i64) -> CoreResult<()> {
    if quantity <= 0 {
        return Err(CoreError::invalid_argument(
            "quantity",
            format!("must be positive, got {}", quantity),
        ));
    }
    Ok(())
}

/// Validates a batch size (must be > 0).
pub fn validate_batch_size(batch_size: i64) -> CoreResult<()> {
    if batch_size <= 0 {
        return Err(CoreError::invalid_argument(
            "batch_size",
            format!("must be positive, got {}", batch_size),
        ));
    }
    Ok(())
}

/// Validates a service's orderable range.
///
/// ## Rules
/// - `min_quantity >= 1`
/// - `max_quantity >= min_quantity`
pub fn validate_quantity_limits(min_quantity: i64, max_quantity: i64) -> ValidationResult<()> {
    if min_quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "min_quantity".to_string(),
        });
    }
    if max_quantity < min_quantity {
        return Err(ValidationError::OutOfRange {
            field: "max_quantity".to_string(),
            min: min_quantity,
            max: i64::MAX,
        });
    }
    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a service slug.
///
/// ## Rules
/// - Not empty, at most 64 characters
/// - Lowercase ASCII letters, digits and hyphens only
///
/// ## Example
/// ```rust
/// use boostline_core::validation::validate_slug;
///
/// assert!(validate_slug("ranked-wins").is_ok());
/// assert!(validate_slug("Ranked Wins").is_err());
/// ```
pub fn validate_slug(slug: &str) -> ValidationResult<()> {
    if slug.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "slug".to_string(),
        });
    }

    if slug.len() > MAX_SLUG_LEN {
        return Err(ValidationError::TooLong {
            field: "slug".to_string(),
            max: MAX_SLUG_LEN,
        });
    }

    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "slug".to_string(),
            reason: "must contain only lowercase letters, numbers, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates a service display name (1-200 characters after trimming).
pub fn validate_service_name(name: &str) -> ValidationResult<()> {
    validate_text("name", name, MAX_NAME_LEN)
}

/// Validates a unit label such as "win" (1-32 characters after trimming).
pub fn validate_unit_label(label: &str) -> ValidationResult<()> {
    validate_text("unit_label", label, MAX_LABEL_LEN)
}

fn validate_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use boostline_core::validation::validate_uuid;
///
/// assert!(validate_uuid("order_id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("order_id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
