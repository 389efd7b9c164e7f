//! # Batch Decomposition
//!
//! Splits a large order into fixed-size fulfillment batches, each paid
//! according to where its units sit in the overall tier schedule.
//!
//! ## Global Unit Positions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  total_quantity = 25, batch_size = 10                                   │
//! │                                                                         │
//! │  units:    1 ────── 10 │ 11 ────── 20 │ 21 ── 25                        │
//! │  batch:        #1      │      #2      │    #3                           │
//! │  tier:     A (2.00)    │  B (1.50)    │ B (1.50)                        │
//! │  payout:   20.00       │  15.00       │  7.50        = 42.50            │
//! │                                                                         │
//! │  Batch #2 is NOT priced as units 1-10 again: it is paid at the tier    │
//! │  its units fall into, so the batches add up to the unbatched payout.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::tiers::{RateKind, TierTable};
use crate::types::Batch;
use crate::validation::{validate_batch_size, validate_quantity};

/// Number of batches needed for `total_quantity` units: `ceil(total / size)`.
///
/// Both arguments must already be positive. Never overflows, even for
/// `batch_size == i64::MAX`.
#[inline]
pub fn batch_count(total_quantity: i64, batch_size: i64) -> i64 {
    (total_quantity - 1) / batch_size + 1
}

/// Decomposes an order into ordered batches.
///
/// ## Behavior
/// - batch `k` covers units `[(k-1)*batch_size + 1, min(k*batch_size, total)]`
/// - every batch but the last has exactly `batch_size` units
/// - payouts sum to `calculate_tiered_price(total_quantity).total_payout`
///
/// ## Example
/// ```rust
/// use boostline_core::{calculate_batches, PricingTier, TierTable, rate::UnitRate};
///
/// let tiers = TierTable::new(vec![
///     PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
///     PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
/// ])
/// .unwrap();
///
/// let batches = calculate_batches(15, 10, &tiers).unwrap();
/// assert_eq!(batches.len(), 2);
/// assert_eq!(batches[0].payout.cents(), 2000);
/// assert_eq!(batches[1].payout.cents(), 750);
/// ```
pub fn calculate_batches(
    total_quantity: i64,
    batch_size: i64,
    tiers: &TierTable,
) -> CoreResult<Vec<Batch>> {
    validate_quantity(total_quantity)?;
    validate_batch_size(batch_size)?;
    tiers.ensure_covers(total_quantity)?;

    let count = batch_count(total_quantity, batch_size);
    let mut batches = Vec::new();

    for batch_number in 1..=count {
        // (batch_number - 1) * batch_size < total_quantity, so neither bound
        // can leave the i64 range.
        let first_unit = (batch_number - 1) * batch_size + 1;
        let last_unit = first_unit + (batch_size - 1).min(total_quantity - first_unit);

        batches.push(Batch {
            batch_number,
            unit_count: last_unit - first_unit + 1,
            payout: tiers.amount_for_units(RateKind::Payout, first_unit, last_unit)?,
            first_unit,
            last_unit,
        });
    }

    Ok(batches)
}

/// Booster payout for the inclusive global unit range
/// `[batch_start_unit, batch_end_unit]`.
///
/// Uses the same tier-overlap routine as whole-order pricing.
pub fn calculate_batch_payout(
    batch_start_unit: i64,
    batch_end_unit: i64,
    tiers: &TierTable,
) -> CoreResult<Money> {
    if batch_start_unit < 1 {
        return Err(CoreError::invalid_argument(
            "batch_start_unit",
            format!("unit positions start at 1, got {}", batch_start_unit),
        ));
    }
    if batch_end_unit < batch_start_unit {
        return Err(CoreError::invalid_argument(
            "batch_end_unit",
            format!("range {}-{} is inverted", batch_start_unit, batch_end_unit),
        ));
    }
    tiers.ensure_covers(batch_end_unit)?;

    tiers.amount_for_units(RateKind::Payout, batch_start_unit, batch_end_unit)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TierTableError;
    use crate::pricing::calculate_tiered_price;
    use crate::rate::UnitRate;
    use crate::types::PricingTier;

    fn table() -> TierTable {
        TierTable::new(vec![
            PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
            PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
        ])
        .unwrap()
    }

    #[test]
    fn test_batch_count() {
        assert_eq!(batch_count(15, 10), 2);
        assert_eq!(batch_count(20, 10), 2);
        assert_eq!(batch_count(1, 10), 1);
        assert_eq!(batch_count(25, 1), 25);
        assert_eq!(batch_count(15, i64::MAX), 1);
        assert_eq!(batch_count(i64::MAX, 2), i64::MAX / 2 + 1);
    }

    #[test]
    fn test_huge_batch_size_gives_one_batch() {
        let tiers = table();
        let batches = calculate_batches(15, i64::MAX, &tiers).unwrap();

        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].unit_count, 15);
        assert_eq!((batches[0].first_unit, batches[0].last_unit), (1, 15));
        assert_eq!(
            batches[0].payout,
            calculate_tiered_price(15, &tiers).unwrap().total_payout
        );
    }

    #[test]
    fn test_last_batch_ends_at_top_of_unit_range() {
        let tiers = TierTable::new(vec![PricingTier::new(
            1,
            i64::MAX,
            UnitRate::zero(),
            UnitRate::zero(),
        )])
        .unwrap();

        let payout = calculate_batch_payout(i64::MAX - 9, i64::MAX, &tiers).unwrap();
        assert!(payout.is_zero());

        let batches = calculate_batches(i64::MAX, i64::MAX - 1, &tiers).unwrap();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].last_unit, i64::MAX - 1);
        assert_eq!((batches[1].first_unit, batches[1].last_unit), (i64::MAX, i64::MAX));
        assert_eq!(batches[1].unit_count, 1);
    }

    #[test]
    fn test_two_batches_reconcile_with_unbatched_payout() {
        let tiers = table();
        let batches = calculate_batches(15, 10, &tiers).unwrap();

        assert_eq!(batches[0].unit_count, 10);
        assert_eq!(batches[0].payout.cents(), 2000);
        assert_eq!(batches[1].unit_count, 5);
        assert_eq!(batches[1].payout.cents(), 750);

        let total: Money = batches.iter().map(|b| b.payout).sum();
        assert_eq!(total, calculate_tiered_price(15, &tiers).unwrap().total_payout);
    }

    #[test]
    fn test_three_batches_use_global_positions() {
        let batches = calculate_batches(25, 10, &table()).unwrap();
        let summary: Vec<(i64, i64, i64, i64)> = batches
            .iter()
            .map(|b| (b.batch_number, b.unit_count, b.first_unit, b.payout.cents()))
            .collect();

        assert_eq!(
            summary,
            vec![(1, 10, 1, 2000), (2, 10, 11, 1500), (3, 5, 21, 750)]
        );
        let total: Money = batches.iter().map(|b| b.payout).sum();
        assert_eq!(total.cents(), 4250);
    }

    #[test]
    fn test_batch_straddling_tiers() {
        let batches = calculate_batches(16, 8, &table()).unwrap();
        // units 9-16: 2 at 2.00 + 6 at 1.50
        assert_eq!(batches[1].payout.cents(), 400 + 900);
    }

    #[test]
    fn test_single_batch_when_size_exceeds_quantity() {
        let batches = calculate_batches(7, 10, &table()).unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].unit_count, 7);
        assert_eq!(batches[0].last_unit, 7);
    }

    #[test]
    fn test_invalid_arguments() {
        let tiers = table();
        assert!(matches!(
            calculate_batches(0, 10, &tiers).unwrap_err(),
            CoreError::InvalidArgument { .. }
        ));
        assert!(matches!(
            calculate_batches(15, 0, &tiers).unwrap_err(),
            CoreError::InvalidArgument { .. }
        ));
        assert!(matches!(
            calculate_batches(15, -5, &tiers).unwrap_err(),
            CoreError::InvalidArgument { .. }
        ));
        assert!(matches!(
            calculate_batches(31, 10, &tiers).unwrap_err(),
            CoreError::InvalidTierTable(TierTableError::DoesNotCover { .. })
        ));
    }

    #[test]
    fn test_batch_payout_helper() {
        let tiers = table();
        assert_eq!(calculate_batch_payout(11, 20, &tiers).unwrap().cents(), 1500);
        assert_eq!(calculate_batch_payout(5, 12, &tiers).unwrap().cents(), 1200 + 300);
        assert_eq!(
            calculate_batch_payout(1, 15, &tiers).unwrap(),
            calculate_tiered_price(15, &tiers).unwrap().total_payout
        );

        assert!(calculate_batch_payout(0, 5, &tiers).is_err());
        assert!(calculate_batch_payout(6, 5, &tiers).is_err());
        assert!(calculate_batch_payout(25, 31, &tiers).is_err());
    }
}
