//! # Tiered Pricing
//!
//! Converts a unit quantity into a customer price and a booster payout.
//!
//! ## Walk Through the Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  quantity = 15                                                          │
//! │                                                                         │
//! │  tier A (1-10)  @ 5.00 / 2.00   ██████████      10 units  50.00 / 20.00│
//! │  tier B (11-30) @ 4.00 / 1.50             █████  5 units  20.00 /  7.50│
//! │                                                  ───────────────────── │
//! │                                                  total    70.00 / 27.50│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, TierTableError};
use crate::rate::{round_to_cents, UnitRate};
use crate::tiers::{RateKind, TierTable};
use crate::types::{PricingTier, TierBreakdown, TieredPriceResult};

/// Prices units `1..=quantity` against the tier table.
///
/// ## Behavior
/// - `quantity == 0` gives zero totals and an empty breakdown
/// - negative quantities fail with `InvalidArgument`
/// - quantities above the table fail with `InvalidTierTable`
/// - totals too large for [`Money`](crate::money::Money) fail with
///   `InvalidArgument`
///
/// ## Example
/// ```rust
/// use boostline_core::{calculate_tiered_price, PricingTier, TierTable, rate::UnitRate};
///
/// let tiers = TierTable::new(vec![
///     PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
///     PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
/// ])
/// .unwrap();
///
/// let result = calculate_tiered_price(15, &tiers).unwrap();
/// assert_eq!(result.total_price.cents(), 7000);
/// assert_eq!(result.total_payout.cents(), 2750);
/// assert_eq!(result.breakdown.len(), 2);
/// ```
pub fn calculate_tiered_price(quantity: i64, tiers: &TierTable) -> CoreResult<TieredPriceResult> {
    if quantity < 0 {
        return Err(CoreError::invalid_argument(
            "quantity",
            format!("must not be negative, got {}", quantity),
        ));
    }
    if quantity == 0 {
        return Ok(TieredPriceResult::default());
    }
    tiers.ensure_covers(quantity)?;

    let mut result = TieredPriceResult::default();
    let mut exact_price: i128 = 0;
    let mut exact_payout: i128 = 0;

    for segment in tiers.segments(1, quantity) {
        let units = segment.units();
        let tier = segment.tier;

        // Subtotals are differences of rounded running totals so the
        // breakdown always sums to the totals.
        exact_price += RateKind::Price.of(tier).exact_total(units);
        exact_payout += RateKind::Payout.of(tier).exact_total(units);
        let price_so_far = round_to_cents(exact_price)?;
        let payout_so_far = round_to_cents(exact_payout)?;

        result.breakdown.push(TierBreakdown {
            min_quantity: tier.min_quantity,
            max_quantity: tier.max_quantity,
            units_in_tier: units,
            price_per_unit: tier.price_per_unit,
            payout_per_unit: tier.booster_payout_per_unit,
            subtotal: price_so_far - result.total_price,
            payout_subtotal: payout_so_far - result.total_payout,
        });

        result.total_price = price_so_far;
        result.total_payout = payout_so_far;
    }

    Ok(result)
}

/// Returns the `price_per_unit` of the lowest tier.
///
/// Takes raw tier rows so storefront listings can render a price before
/// the table is validated. An empty list is an error, never a zero price.
///
/// ## Example
/// ```rust
/// use boostline_core::{get_starting_price, PricingTier, rate::UnitRate};
///
/// let rows = vec![
///     PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
///     PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
/// ];
/// assert_eq!(get_starting_price(&rows).unwrap(), UnitRate::from_cents(500));
/// assert!(get_starting_price(&[]).is_err());
/// ```
pub fn get_starting_price(tiers: &[PricingTier]) -> CoreResult<UnitRate> {
    tiers
        .iter()
        .min_by_key(|tier| tier.min_quantity)
        .map(|tier| tier.price_per_unit)
        .ok_or_else(|| TierTableError::Empty.into())
}

// =============================================================================
// Unit Tests
// =============================================================================
