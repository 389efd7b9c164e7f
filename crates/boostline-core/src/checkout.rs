//! # Checkout Quotes
//!
//! What the checkout route needs before it creates a payment session.
//!
//! ## User Workflow
//! ```text
//! Customer picks "Ranked Wins" × 45
//!      │
//!      ▼
//! quote_checkout(service, 45) ← THIS MODULE
//!      │
//!      ├── 45 > max_quantity (30)? → clamp to 30, clamped = true
//!      │
//!      ▼
//! calculate_tiered_price(30, tiers)
//!      │
//!      ▼
//! line_item_amount_cents() = 13000 → payment processor line item
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing::calculate_tiered_price;
use crate::types::{BoostService, TieredPriceResult};
use crate::validation::validate_quantity;

/// A priced checkout request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutQuote {
    pub service_slug: String,
    /// Quantity the customer asked for.
    pub requested_quantity: i64,
    /// Quantity actually priced, after clamping to the service limits.
    pub quantity: i64,
    /// True when `quantity != requested_quantity`.
    pub clamped: bool,
    pub pricing: TieredPriceResult,
}

impl CheckoutQuote {
    /// Integer-cents amount for the payment line item.
    pub fn line_item_amount_cents(&self) -> i64 {
        self.pricing.total_price.cents()
    }

    /// Average price per unit, for the "x units at ~$y" summary line.
    ///
    /// Rounded half up to the cent. Totals are never negative.
    pub fn unit_amount_display(&self, currency_symbol: &str) -> String {
        if self.quantity <= 0 {
            return Money::zero().display_with(currency_symbol);
        }
        let total = self.pricing.total_price.cents();
        let (whole, rest) = (total / self.quantity, total % self.quantity);
        let round_up = rest >= self.quantity - rest;
        Money::from_cents(whole + i64::from(round_up)).display_with(currency_symbol)
    }
}

/// Prices a checkout request for a service.
///
/// Non-positive requests fail; anything outside the service's orderable
/// range is clamped into it.
///
/// ## Example
/// ```rust
/// use boostline_core::{quote_checkout, BoostService, PricingTier, TierTable, rate::UnitRate};
///
/// let tiers = TierTable::new(vec![
///     PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
///     PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
/// ])
/// .unwrap();
/// let service =
///     BoostService::new("ranked-wins", "Ranked Wins", "win", 1, 30, Some(10), tiers).unwrap();
///
/// let quote = quote_checkout(&service, 45).unwrap();
/// assert!(quote.clamped);
/// assert_eq!(quote.quantity, 30);
/// assert_eq!(quote.line_item_amount_cents(), 13000);
/// ```
pub fn quote_checkout(
    service: &BoostService,
    requested_quantity: i64,
) -> CoreResult<CheckoutQuote> {
    validate_quantity(requested_quantity)?;

    let quantity = service.clamp_quantity(requested_quantity);
    let pricing = calculate_tiered_price(quantity, &service.tiers)?;

    Ok(CheckoutQuote {
        service_slug: service.slug.clone(),
        requested_quantity,
        quantity,
        clamped: quantity != requested_quantity,
        pricing,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
