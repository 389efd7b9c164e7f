//! # Money
//!
//! Settled amounts: order totals, tier subtotals, batch and job payouts.
//!
//! ```text
//! UnitRate (1/10_000 unit, exact)  ──round once──►  Money (i64 cents)
//!
//!   tier subtotals ──┐
//!                    ├──► total_price  ──► payment line item (unit_amount)
//!   batch payouts ───┴──► total_payout ──► booster job records
//! ```
//!
//! Money never holds sub-cent values. Per-unit rates stay in
//! [`UnitRate`](crate::rate::UnitRate) until an amount is settled.
//!
//! ```rust
//! use boostline_core::money::Money;
//!
//! let first_batch = Money::from_cents(2000);
//! let second_batch = Money::from_cents(750);
//! assert_eq!((first_batch + second_batch).to_string(), "$27.50");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

/// Whole cents. Serialized as a bare integer so payment APIs can take it as-is.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Renders with a currency symbol, e.g. `"€27.50"` or `"-$5.50"`.
    pub fn display_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

/// Dollar rendering. Catalog-aware callers use [`Money::display_with`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_with("$"))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

/// Used for platform margin (`total_price - total_payout`) and for
/// cumulative-rounding differences.
impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(7000).to_string(), "$70.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(4250).display_with("£"), "£42.50");
        assert_eq!(Money::from_cents(5).display_with(""), "0.05");
        assert_eq!(Money::from_cents(i64::MIN).display_with("$"), "-$92233720368547758.08");
    }

    #[test]
    fn test_margin_and_payout_sums() {
        let price = Money::from_cents(7000);
        let payouts = [Money::from_cents(2000), Money::from_cents(750)];

        let by_ref: Money = payouts.iter().sum();
        let by_value: Money = payouts.into_iter().sum();
        assert_eq!(by_ref, by_value);
        assert_eq!((price - by_ref).cents(), 4250);
        assert!((by_ref - by_value).is_zero());
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_serializes_as_integer_cents() {
        let json = serde_json::to_string(&Money::from_cents(13_000)).unwrap();
        assert_eq!(json, "13000");
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back.cents(), 13_000);
    }
}
