//! Property-based tests for the pricing invariants.
//!
//! - breakdown units and subtotals add up to the totals
//! - batch payouts reconcile with the unbatched payout
//! - batch shapes follow `ceil(total / size)`
//! - planned jobs cover the order exactly once

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use crate::batch::{batch_count, calculate_batch_payout, calculate_batches};
use crate::fulfillment::{fulfillment_summary, plan_fulfillment};
use crate::money::Money;
use crate::pricing::{calculate_tiered_price, get_starting_price};
use crate::rate::UnitRate;
use crate::tiers::TierTable;
use crate::types::{BoostService, PaidOrder, PricingTier};

// ============================================================================
// Strategies
// ============================================================================

/// Rates up to 50.0000, including sub-cent values.
fn rate_strategy() -> impl Strategy<Value = UnitRate> {
    (0i64..=500_000).prop_map(UnitRate::from_scaled)
}

/// A contiguous table of 1-6 tiers, each 1-40 units wide.
fn table_strategy() -> impl Strategy<Value = TierTable> {
    prop::collection::vec((1i64..=40, rate_strategy(), rate_strategy()), 1..=6).prop_map(|bands| {
        let mut next_min = 1;
        let tiers = bands
            .into_iter()
            .map(|(width, price, payout)| {
                let tier = PricingTier::new(next_min, next_min + width - 1, price, payout);
                next_min += width;
                tier
            })
            .collect();
        TierTable::new(tiers).expect("generated tables are contiguous")
    })
}

/// A table plus a quantity it covers.
fn table_and_quantity() -> impl Strategy<Value = (TierTable, i64)> {
    table_strategy().prop_flat_map(|table| {
        let max = table.max_covered_quantity();
        (Just(table), 1i64..=max)
    })
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_breakdown_adds_up((table, quantity) in table_and_quantity()) {
        let result = calculate_tiered_price(quantity, &table).unwrap();

        prop_assert_eq!(result.total_units(), quantity);

        let price: Money = result.breakdown.iter().map(|b| b.subtotal).sum();
        let payout: Money = result.breakdown.iter().map(|b| b.payout_subtotal).sum();
        prop_assert_eq!(price, result.total_price);
        prop_assert_eq!(payout, result.total_payout);

        let min_quantities: Vec<i64> = result.breakdown.iter().map(|b| b.min_quantity).collect();
        let mut sorted = min_quantities.clone();
        sorted.sort();
        prop_assert_eq!(min_quantities, sorted);
    }

    #[test]
    fn prop_batch_payouts_reconcile(
        (table, quantity) in table_and_quantity(),
        batch_size in 1i64..=25,
    ) {
        let batches = calculate_batches(quantity, batch_size, &table).unwrap();
        let unbatched = calculate_tiered_price(quantity, &table).unwrap();

        let payout: Money = batches.iter().map(|b| b.payout).sum();
        prop_assert_eq!(payout, unbatched.total_payout);
    }

    #[test]
    fn prop_batch_shapes(
        (table, quantity) in table_and_quantity(),
        batch_size in 1i64..=25,
    ) {
        let batches = calculate_batches(quantity, batch_size, &table).unwrap();

        prop_assert_eq!(batches.len() as i64, batch_count(quantity, batch_size));
        prop_assert_eq!(batches.iter().map(|b| b.unit_count).sum::<i64>(), quantity);

        let last = batches.len() - 1;
        for (index, batch) in batches.iter().enumerate() {
            prop_assert_eq!(batch.batch_number, index as i64 + 1);
            if index < last {
                prop_assert_eq!(batch.unit_count, batch_size);
            } else {
                prop_assert_eq!(batch.unit_count, quantity - batch_size * last as i64);
            }
        }
    }

    #[test]
    fn prop_full_range_payout_matches_total((table, quantity) in table_and_quantity()) {
        let payout = calculate_batch_payout(1, quantity, &table).unwrap();
        prop_assert_eq!(payout, calculate_tiered_price(quantity, &table).unwrap().total_payout);
    }

    #[test]
    fn prop_starting_price_is_lowest_tier(table in table_strategy()) {
        let mut shuffled = table.tiers().to_vec();
        shuffled.reverse();
        prop_assert_eq!(get_starting_price(&shuffled).unwrap(), table.tiers()[0].price_per_unit);
        prop_assert_eq!(table.starting_price(), table.tiers()[0].price_per_unit);
    }

    #[test]
    fn prop_planned_jobs_cover_order(
        (table, quantity) in table_and_quantity(),
        batch_size in 1i64..=25,
    ) {
        let max = table.max_covered_quantity();
        let service = BoostService::new("svc", "Service", "unit", 1, max, Some(batch_size), table)
            .unwrap();
        let order = PaidOrder {
            id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            customer_id: "6ba7b810-9dad-11d1-80b4-00c04fd430c8".to_string(),
            service_slug: "svc".to_string(),
            quantity,
            amount_paid: Money::zero(),
            paid_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        };

        let jobs = plan_fulfillment(&order, &service).unwrap();
        let summary = fulfillment_summary(&jobs);
        prop_assert_eq!(summary.unit_count, quantity);
        prop_assert_eq!(
            summary.total_payout,
            calculate_tiered_price(quantity, &service.tiers).unwrap().total_payout
        );

        let mut next_unit = 1;
        for job in &jobs {
            prop_assert_eq!(job.first_unit, next_unit);
            next_unit = job.last_unit + 1;
        }
        prop_assert_eq!(next_unit, quantity + 1);
    }
}
