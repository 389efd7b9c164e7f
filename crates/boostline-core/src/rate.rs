//! # Per-Unit Rates
//!
//! `UnitRate` holds a per-unit customer price or booster payout with
//! sub-cent precision.
//!
//! ## Representation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1 major unit ($1) = 10_000 rate units = 100 cents                     │
//! │                                                                         │
//! │    "5.00"    →  50_000                                                  │
//! │    "1.50"    →  15_000                                                  │
//! │    "0.0125"  →     125   (1.25 cents, kept exact)                      │
//! │                                                                         │
//! │  Totals are accumulated in rate units (i128) and converted to cents    │
//! │  once, rounding half away from zero.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rates travel as decimal strings (`"4.50"`) in JSON and TOML so no
//! floating point value ever reaches the pricing math.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Rate units per major currency unit.
pub const RATE_SCALE: i64 = 10_000;

/// Maximum fractional digits accepted when parsing a rate.
pub const RATE_DECIMALS: usize = 4;

const RATE_UNITS_PER_CENT: i128 = (RATE_SCALE / 100) as i128;

/// A non-negative per-unit amount with four decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitRate(i64);

impl UnitRate {
    /// Creates a rate from raw rate units (1/10_000 of a major unit).
    #[inline]
    pub const fn from_scaled(units: i64) -> Self {
        UnitRate(units)
    }

    /// Creates a whole-cent rate.
    ///
    /// ## Example
    /// ```rust
    /// use boostline_core::rate::UnitRate;
    ///
    /// let rate = UnitRate::from_cents(450);
    /// assert_eq!(rate.to_string(), "4.50");
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        UnitRate(cents * (RATE_SCALE / 100))
    }

    /// Returns the raw rate units.
    #[inline]
    pub const fn scaled(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        UnitRate(0)
    }

    /// Exact cost of `units` at this rate, in rate units.
    #[inline]
    pub fn exact_total(&self, units: i64) -> i128 {
        self.0 as i128 * units as i128
    }

    /// Formats the rate with a currency symbol, keeping sub-cent digits.
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self)
    }
}

/// Converts an exact rate-unit amount to cents, rounding half away from zero.
///
/// Fails with `InvalidArgument` when the cents do not fit in [`Money`].
pub fn round_to_cents(exact: i128) -> CoreResult<Money> {
    let half = RATE_UNITS_PER_CENT / 2;
    let cents = if exact >= 0 {
        (exact + half) / RATE_UNITS_PER_CENT
    } else {
        (exact - half) / RATE_UNITS_PER_CENT
    };
    i64::try_from(cents).map(Money::from_cents).map_err(|_| {
        CoreError::invalid_argument(
            "amount",
            format!("{} cents exceeds the largest representable amount", cents),
        )
    })
}

// =============================================================================
// Parsing & Formatting
// =============================================================================

fn rate_format_error(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "rate".to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for UnitRate {
    type Err = ValidationError;

    /// Parses `"5"`, `"5.0"`, `"4.50"` or `"0.0125"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::Required {
                field: "rate".to_string(),
            });
        }
        if s.starts_with('-') {
            return Err(rate_format_error("must not be negative"));
        }

        let (whole, fraction) = match s.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
            return Err(rate_format_error("expected a decimal number like 4.50"));
        }
        if s.contains('.') && fraction.is_empty() {
            return Err(rate_format_error("missing digits after the decimal point"));
        }
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(rate_format_error("expected a decimal number like 4.50"));
        }
        if fraction.len() > RATE_DECIMALS {
            return Err(rate_format_error("at most 4 decimal places are supported"));
        }

        let whole: i64 = whole
            .parse()
            .map_err(|_| rate_format_error("value is too large"))?;
        let padded = format!("{:0<width$}", fraction, width = RATE_DECIMALS);
        let fraction: i64 = padded
            .parse()
            .map_err(|_| rate_format_error("expected a decimal number like 4.50"))?;

        whole
            .checked_mul(RATE_SCALE)
            .and_then(|w| w.checked_add(fraction))
            .map(UnitRate)
            .ok_or_else(|| rate_format_error("value is too large"))
    }
}

/// Always prints at least two decimals; sub-cent digits only when present.
impl fmt::Display for UnitRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / RATE_SCALE as u64;
        let mut fraction = format!("{:04}", abs % RATE_SCALE as u64);
        while fraction.len() > 2 && fraction.ends_with('0') {
            fraction.pop();
        }
        write!(f, "{}{}.{}", sign, whole, fraction)
    }
}

impl TryFrom<String> for UnitRate {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UnitRate> for String {
    fn from(rate: UnitRate) -> Self {
        rate.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
