//! # Fulfillment Planning
//!
//! Turns a confirmed payment into the job records the webhook handler
//! persists, one per batch.
//!
//! ## Webhook Flow
//! ```text
//! payment confirmed (PaidOrder)
//!      │
//!      ▼
//! plan_fulfillment(order, service) ← THIS MODULE
//!      │
//!      ├── batch_size = Some(n) → calculate_batches(quantity, n, tiers)
//!      │                           one job per batch
//!      │
//!      └── batch_size = None    → one job, payout = total_payout
//!      │
//!      ▼
//! caller inserts order + jobs in one transaction
//! ```

use serde::{Deserialize, Serialize};

use crate::batch::calculate_batches;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::calculate_tiered_price;
use crate::types::{BoostService, FulfillmentJob, JobStatus, PaidOrder};
use crate::validation::validate_uuid;

/// Plans the jobs for a paid order.
///
/// ## Checks
/// - order and customer ids are UUIDs
/// - the order belongs to this service
/// - the quantity is orderable for the service (no clamping at this stage:
///   the customer already paid for exactly this quantity)
pub fn plan_fulfillment(
    order: &PaidOrder,
    service: &BoostService,
) -> CoreResult<Vec<FulfillmentJob>> {
    validate_uuid("order_id", &order.id)?;
    validate_uuid("customer_id", &order.customer_id)?;

    if order.service_slug != service.slug {
        return Err(CoreError::ServiceMismatch {
            expected: service.slug.clone(),
            actual: order.service_slug.clone(),
        });
    }
    service.ensure_orderable(order.quantity)?;

    let job = |batch_sequence: i64,
               total_batches: i64,
               first_unit: i64,
               last_unit: i64,
               booster_payout: Money| FulfillmentJob {
        order_id: order.id.clone(),
        service_slug: service.slug.clone(),
        batch_sequence,
        total_batches,
        unit_count: last_unit - first_unit + 1,
        first_unit,
        last_unit,
        booster_payout,
        status: JobStatus::Open,
        created_at: order.paid_at,
    };

    match service.batch_size {
        Some(batch_size) => {
            let batches = calculate_batches(order.quantity, batch_size, &service.tiers)?;
            let total_batches = batches.len() as i64;
            Ok(batches
                .into_iter()
                .map(|batch| {
                    job(
                        batch.batch_number,
                        total_batches,
                        batch.first_unit,
                        batch.last_unit,
                        batch.payout,
                    )
                })
                .collect())
        }
        None => {
            let pricing = calculate_tiered_price(order.quantity, &service.tiers)?;
            Ok(vec![job(1, 1, 1, order.quantity, pricing.total_payout)])
        }
    }
}

/// Totals over a set of planned jobs, for reconciliation and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FulfillmentSummary {
    pub job_count: usize,
    pub unit_count: i64,
    pub total_payout: Money,
}

/// Summarizes planned jobs.
pub fn fulfillment_summary(jobs: &[FulfillmentJob]) -> FulfillmentSummary {
    FulfillmentSummary {
        job_count: jobs.len(),
        unit_count: jobs.iter().map(|job| job.unit_count).sum(),
        total_payout: jobs.iter().map(|job| job.booster_payout).sum(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rate::UnitRate;
    use crate::tiers::TierTable;
    use crate::types::PricingTier;
    use chrono::{TimeZone, Utc};

    const ORDER_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
    const CUSTOMER_ID: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

    fn service(batch_size: Option<i64>) -> BoostService {
        let tiers = TierTable::new(vec![
            PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
            PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
        ])
        .unwrap();
        BoostService::new("ranked-wins", "Ranked Wins", "win", 1, 30, batch_size, tiers).unwrap()
    }

    fn order(quantity: i64) -> PaidOrder {
        PaidOrder {
            id: ORDER_ID.to_string(),
            customer_id: CUSTOMER_ID.to_string(),
            service_slug: "ranked-wins".to_string(),
            quantity,
            amount_paid: Money::from_cents(7000),
            paid_at: Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_batched_plan() {
        let order = order(25);
        let jobs = plan_fulfillment(&order, &service(Some(10))).unwrap();

        assert_eq!(jobs.len(), 3);
        let sequences: Vec<i64> = jobs.iter().map(|j| j.batch_sequence).collect();
        assert_eq!(sequences, vec![1, 2, 3]);
        assert!(jobs.iter().all(|j| j.total_batches == 3));
        assert!(jobs.iter().all(|j| j.status == JobStatus::Open));
        assert!(jobs.iter().all(|j| j.created_at == order.paid_at));
        assert!(jobs.iter().all(|j| j.order_id == ORDER_ID));

        let payouts: Vec<i64> = jobs.iter().map(|j| j.booster_payout.cents()).collect();
        assert_eq!(payouts, vec![2000, 1500, 750]);
    }

    #[test]
    fn test_unbatched_plan_is_single_job() {
        let jobs = plan_fulfillment(&order(15), &service(None)).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].batch_sequence, 1);
        assert_eq!(jobs[0].total_batches, 1);
        assert_eq!(jobs[0].unit_count, 15);
        assert_eq!(jobs[0].booster_payout.cents(), 2750);
    }

    #[test]
    fn test_summary_reconciles() {
        let jobs = plan_fulfillment(&order(25), &service(Some(10))).unwrap();
        let summary = fulfillment_summary(&jobs);
        assert_eq!(summary.job_count, 3);
        assert_eq!(summary.unit_count, 25);
        assert_eq!(summary.total_payout.cents(), 4250);
        assert_eq!(fulfillment_summary(&[]), FulfillmentSummary::default());
    }

    #[test]
    fn test_rejects_wrong_service() {
        let mut order = order(5);
        order.service_slug = "placements".to_string();
        assert_eq!(
            plan_fulfillment(&order, &service(Some(10))).unwrap_err(),
            CoreError::ServiceMismatch {
                expected: "ranked-wins".to_string(),
                actual: "placements".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_bad_ids_and_quantities() {
        let mut bad_id = order(5);
        bad_id.id = "order-1".to_string();
        assert!(matches!(
            plan_fulfillment(&bad_id, &service(None)).unwrap_err(),
            CoreError::Validation(_)
        ));

        assert!(matches!(
            plan_fulfillment(&order(31), &service(Some(10))).unwrap_err(),
            CoreError::InvalidArgument { .. }
        ));
        assert!(plan_fulfillment(&order(0), &service(Some(10))).is_err());
    }
}
