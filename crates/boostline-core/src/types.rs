//! # Domain Types
//!
//! Values exchanged between the pricing core and its callers.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌───────────────────┐   ┌─────────────────┐     │
//! │  │  BoostService   │   │ TieredPriceResult │   │     Batch       │     │
//! │  │  ─────────────  │   │ ───────────────── │   │  ─────────────  │     │
//! │  │  slug           │   │ total_price       │   │  batch_number   │     │
//! │  │  min/max qty    │   │ total_payout      │   │  unit_count     │     │
//! │  │  batch_size     │   │ breakdown[]       │   │  payout         │     │
//! │  │  tiers ─────────┼─► └───────────────────┘   └────────┬────────┘     │
//! │  └─────────────────┘                                    │              │
//! │                                                         ▼              │
//! │  ┌─────────────────┐                           ┌─────────────────┐     │
//! │  │   PaidOrder     │ ── plan_fulfillment ────► │ FulfillmentJob  │     │
//! │  └─────────────────┘                           └─────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::rate::UnitRate;
use crate::tiers::TierTable;
use crate::validation::{
    validate_batch_size, validate_quantity_limits, validate_service_name, validate_slug,
    validate_unit_label,
};

// =============================================================================
// Pricing Tier
// =============================================================================

/// Price and payout per unit for one quantity band.
///
/// Bands are inclusive on both ends: `1-10` then `11-30`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingTier {
    /// First unit (1-based) priced by this tier.
    pub min_quantity: i64,

    /// Last unit priced by this tier.
    pub max_quantity: i64,

    /// Customer price per unit.
    #[ts(as = "String")]
    pub price_per_unit: UnitRate,

    /// Booster payout per unit.
    #[ts(as = "String")]
    pub booster_payout_per_unit: UnitRate,
}

impl PricingTier {
    pub fn new(
        min_quantity: i64,
        max_quantity: i64,
        price_per_unit: UnitRate,
        booster_payout_per_unit: UnitRate,
    ) -> Self {
        PricingTier {
            min_quantity,
            max_quantity,
            price_per_unit,
            booster_payout_per_unit,
        }
    }

    /// Units of `[first_unit, last_unit]` that fall inside this tier.
    ///
    /// ## Example
    /// ```rust
    /// use boostline_core::{PricingTier, rate::UnitRate};
    ///
    /// let tier = PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150));
    /// assert_eq!(tier.overlap(1, 15), 5);
    /// assert_eq!(tier.overlap(21, 25), 5);
    /// assert_eq!(tier.overlap(1, 10), 0);
    /// ```
    pub fn overlap(&self, first_unit: i64, last_unit: i64) -> i64 {
        let start = first_unit.max(self.min_quantity);
        let end = last_unit.min(self.max_quantity);
        end.saturating_sub(start).saturating_add(1).max(0)
    }

    /// Human-readable band, e.g. `"11-30"`.
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.min_quantity, self.max_quantity)
    }
}

// =============================================================================
// Tiered Price Result
// =============================================================================

/// One tier's contribution to a priced quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TierBreakdown {
    pub min_quantity: i64,
    pub max_quantity: i64,
    /// Units of the order priced by this tier.
    pub units_in_tier: i64,
    #[ts(as = "String")]
    pub price_per_unit: UnitRate,
    #[ts(as = "String")]
    pub payout_per_unit: UnitRate,
    /// Customer price for these units.
    pub subtotal: Money,
    /// Booster payout for these units.
    pub payout_subtotal: Money,
}

impl TierBreakdown {
    /// The tier's band, e.g. `"1-10"`.
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.min_quantity, self.max_quantity)
    }
}

/// Total price and payout for a quantity, with a per-tier audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TieredPriceResult {
    pub total_price: Money,
    pub total_payout: Money,
    /// Contributing tiers in ascending order.
    pub breakdown: Vec<TierBreakdown>,
}

impl TieredPriceResult {
    /// Units priced across the breakdown.
    pub fn total_units(&self) -> i64 {
        self.breakdown.iter().map(|b| b.units_in_tier).sum()
    }

    /// What the platform keeps after paying the booster.
    pub fn platform_margin(&self) -> Money {
        self.total_price - self.total_payout
    }
}

// =============================================================================
// Batch
// =============================================================================

/// One fulfillment slice of a large order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Batch {
    /// 1-based position in the batch sequence.
    pub batch_number: i64,
    pub unit_count: i64,
    pub payout: Money,
    /// First global unit position covered by this batch.
    pub first_unit: i64,
    /// Last global unit position covered by this batch.
    pub last_unit: i64,
}

// =============================================================================
// Boost Service
// =============================================================================

/// A purchasable boosting service and its price schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BoostService {
    /// URL-safe identifier, e.g. `"ranked-wins"`.
    pub slug: String,

    /// Display name shown at checkout.
    pub name: String,

    /// What one unit is called ("win", "rank", "level").
    pub unit_label: String,

    /// Smallest orderable quantity.
    pub min_quantity: i64,

    /// Largest orderable quantity; checkout clamps to this.
    pub max_quantity: i64,

    /// Units per fulfillment job. `None` means one job per order.
    pub batch_size: Option<i64>,

    #[ts(as = "Vec<PricingTier>")]
    pub tiers: TierTable,
}

impl BoostService {
    /// Creates a validated service.
    ///
    /// ## Rules
    /// - slug, name and unit label pass field validation
    /// - `1 <= min_quantity <= max_quantity`
    /// - the tier table covers `max_quantity`
    /// - `batch_size`, when set, is positive
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        unit_label: impl Into<String>,
        min_quantity: i64,
        max_quantity: i64,
        batch_size: Option<i64>,
        tiers: TierTable,
    ) -> CoreResult<Self> {
        let service = BoostService {
            slug: slug.into(),
            name: name.into(),
            unit_label: unit_label.into(),
            min_quantity,
            max_quantity,
            batch_size,
            tiers,
        };
        service.validate()?;
        Ok(service)
    }

    /// Re-checks every invariant listed on [`BoostService::new`].
    pub fn validate(&self) -> CoreResult<()> {
        validate_slug(&self.slug)?;
        validate_service_name(&self.name)?;
        validate_unit_label(&self.unit_label)?;
        validate_quantity_limits(self.min_quantity, self.max_quantity)?;
        self.tiers.ensure_covers(self.max_quantity)?;
        if let Some(size) = self.batch_size {
            validate_batch_size(size)?;
        }
        Ok(())
    }

    /// Advertised "starting from" per-unit price.
    pub fn starting_price(&self) -> UnitRate {
        self.tiers.starting_price()
    }

    /// Storefront text, e.g. `"From $5.00 per win"`.
    pub fn display_from_price(&self, currency_symbol: &str) -> String {
        format!(
            "From {} per {}",
            self.starting_price().display_with(currency_symbol),
            self.unit_label
        )
    }

    /// Clamps a requested quantity into the orderable range.
    pub fn clamp_quantity(&self, requested: i64) -> i64 {
        requested.clamp(self.min_quantity, self.max_quantity)
    }

    /// Checks that a quantity is orderable without clamping.
    pub fn ensure_orderable(&self, quantity: i64) -> CoreResult<()> {
        if quantity < self.min_quantity || quantity > self.max_quantity {
            return Err(CoreError::invalid_argument(
                "quantity",
                format!(
                    "{} is outside {}-{} for service '{}'",
                    quantity, self.min_quantity, self.max_quantity, self.slug
                ),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Orders & Jobs
// =============================================================================

/// A confirmed payment, as handed over by the payment webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaidOrder {
    /// Order id (UUID v4).
    pub id: String,
    /// Paying customer (UUID v4).
    pub customer_id: String,
    pub service_slug: String,
    /// Units purchased.
    pub quantity: i64,
    /// What the payment processor reported as charged.
    pub amount_paid: Money,
    #[ts(as = "String")]
    pub paid_at: DateTime<Utc>,
}

/// Lifecycle of a fulfillment job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Waiting for a booster to claim it.
    #[default]
    Open,
    Claimed,
    InProgress,
    Completed,
    Cancelled,
}

/// A job record to be persisted for one batch of an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FulfillmentJob {
    pub order_id: String,
    pub service_slug: String,
    /// Matches `Batch::batch_number`.
    pub batch_sequence: i64,
    pub total_batches: i64,
    pub unit_count: i64,
    pub first_unit: i64,
    pub last_unit: i64,
    pub booster_payout: Money,
    pub status: JobStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
