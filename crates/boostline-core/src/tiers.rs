//! # Tier Tables
//!
//! A validated, read-only price schedule and the single tier-overlap
//! routine every calculation goes through.
//!
//! ## Coverage Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  unit:   1 ─────────── 10 │ 11 ──────────────────────── 30             │
//! │          tier A @ 5.00     │ tier B @ 4.00                              │
//! │                                                                         │
//! │  A TierTable always covers [1, max_covered_quantity] with no gap and   │
//! │  no overlap, so every unit up to the top of the table has exactly one  │
//! │  price. Anything above it is rejected, never priced at zero.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! Amounts for a unit range `[a, b]` are derived from rounded cumulative
//! totals: `round(exact(1..=b)) - round(exact(1..=a-1))`. Any partition of
//! an order (tiers in a breakdown, batches in a plan) therefore sums to the
//! same rounded total.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, TierTableError};
use crate::money::Money;
use crate::rate::{round_to_cents, UnitRate};
use crate::types::PricingTier;

// =============================================================================
// Tier Segment
// =============================================================================

/// The part of a unit range that falls inside one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSegment<'a> {
    pub tier: &'a PricingTier,
    pub first_unit: i64,
    pub last_unit: i64,
}

impl TierSegment<'_> {
    #[inline]
    pub fn units(&self) -> i64 {
        self.last_unit - self.first_unit + 1
    }
}

/// Which per-unit rate of a tier an amount is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateKind {
    /// Customer price.
    Price,
    /// Booster payout.
    Payout,
}

impl RateKind {
    #[inline]
    pub fn of(self, tier: &PricingTier) -> UnitRate {
        match self {
            RateKind::Price => tier.price_per_unit,
            RateKind::Payout => tier.booster_payout_per_unit,
        }
    }
}

// =============================================================================
// Tier Table
// =============================================================================

/// An ascending, contiguous tier table starting at unit 1.
///
/// ## Example
/// ```rust
/// use boostline_core::{PricingTier, TierTable, rate::UnitRate};
///
/// let table = TierTable::new(vec![
///     PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
///     PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
/// ])
/// .unwrap();
///
/// assert_eq!(table.max_covered_quantity(), 30);
/// assert_eq!(table.starting_price(), UnitRate::from_cents(500));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PricingTier>", into = "Vec<PricingTier>")]
pub struct TierTable {
    tiers: Vec<PricingTier>,
}

impl TierTable {
    /// Sorts tiers by `min_quantity` and validates the schedule.
    ///
    /// ## Rules
    /// - at least one tier
    /// - every tier has `min_quantity <= max_quantity`
    /// - rates are non-negative
    /// - the lowest tier starts at unit 1
    /// - each tier starts right after the previous one ends
    pub fn new(mut tiers: Vec<PricingTier>) -> CoreResult<Self> {
        if tiers.is_empty() {
            return Err(TierTableError::Empty.into());
        }

        for tier in &tiers {
            if tier.min_quantity > tier.max_quantity {
                return Err(TierTableError::InvertedRange {
                    min_quantity: tier.min_quantity,
                    max_quantity: tier.max_quantity,
                }
                .into());
            }
            if tier.price_per_unit.scaled() < 0 || tier.booster_payout_per_unit.scaled() < 0 {
                return Err(CoreError::invalid_argument(
                    "tier rate",
                    format!("tier {} has a negative rate", tier.range_label()),
                ));
            }
        }

        tiers.sort_by_key(|tier| tier.min_quantity);

        let first = tiers[0].min_quantity;
        if first != 1 {
            return Err(TierTableError::DoesNotStartAtOne {
                min_quantity: first,
            }
            .into());
        }

        for pair in tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            // Every min_quantity is >= 1 here, so `- 1` cannot underflow.
            if next.min_quantity - 1 > prev.max_quantity {
                return Err(TierTableError::Gap {
                    first_missing: prev.max_quantity + 1,
                    last_missing: next.min_quantity - 1,
                }
                .into());
            }
            if next.min_quantity <= prev.max_quantity {
                return Err(TierTableError::Overlap {
                    first_shared: next.min_quantity,
                    last_shared: prev.max_quantity.min(next.max_quantity),
                }
                .into());
            }
        }

        Ok(TierTable { tiers })
    }

    /// Tiers in ascending order.
    pub fn tiers(&self) -> &[PricingTier] {
        &self.tiers
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Highest unit position the table prices.
    pub fn max_covered_quantity(&self) -> i64 {
        self.tiers.last().map_or(0, |tier| tier.max_quantity)
    }

    /// Per-unit price of the lowest tier.
    pub fn starting_price(&self) -> UnitRate {
        self.tiers[0].price_per_unit
    }

    /// Fails unless every unit up to `quantity` has a tier.
    pub fn ensure_covers(&self, quantity: i64) -> CoreResult<()> {
        let max_covered = self.max_covered_quantity();
        if quantity > max_covered {
            return Err(TierTableError::DoesNotCover {
                quantity,
                max_covered,
            }
            .into());
        }
        Ok(())
    }

    /// Splits `[first_unit, last_unit]` into per-tier segments, ascending.
    ///
    /// This is the one overlap computation shared by whole-order pricing and
    /// per-batch payouts. Callers check coverage first.
    pub fn segments(
        &self,
        first_unit: i64,
        last_unit: i64,
    ) -> impl Iterator<Item = TierSegment<'_>> {
        self.tiers.iter().filter_map(move |tier| {
            let units = tier.overlap(first_unit, last_unit);
            (units > 0).then(|| TierSegment {
                tier,
                first_unit: first_unit.max(tier.min_quantity),
                last_unit: last_unit.min(tier.max_quantity),
            })
        })
    }

    /// Exact amount for units `1..=through_unit`, in rate units.
    pub fn exact_cumulative(&self, kind: RateKind, through_unit: i64) -> i128 {
        if through_unit < 1 {
            return 0;
        }
        self.segments(1, through_unit)
            .map(|segment| kind.of(segment.tier).exact_total(segment.units()))
            .sum()
    }

    /// Rounded amount attributed to units `[first_unit, last_unit]`.
    ///
    /// Fails when the running total through `last_unit` does not fit in
    /// [`Money`].
    pub fn amount_for_units(
        &self,
        kind: RateKind,
        first_unit: i64,
        last_unit: i64,
    ) -> CoreResult<Money> {
        let through_end = round_to_cents(self.exact_cumulative(kind, last_unit))?;
        let before_start = round_to_cents(self.exact_cumulative(kind, first_unit - 1))?;
        Ok(through_end - before_start)
    }
}

impl TryFrom<Vec<PricingTier>> for TierTable {
    type Error = CoreError;

    fn try_from(tiers: Vec<PricingTier>) -> Result<Self, Self::Error> {
        TierTable::new(tiers)
    }
}

impl From<TierTable> for Vec<PricingTier> {
    fn from(table: TierTable) -> Self {
        table.tiers
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
