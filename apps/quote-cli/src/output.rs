//! Output formatting for command results.
//!
//! Every result renders either as an aligned text table or as JSON for
//! scripts.

use boostline_core::{Batch, BoostService, CheckoutQuote, Money};
use serde_json::json;

/// Types that can be printed in both formats.
pub trait Outputable {
    fn to_json(&self) -> serde_json::Value;

    fn to_human(&self) -> String;
}

/// Prints a value in the requested format.
pub fn print_output<T: Outputable>(value: &T, json: bool) {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&value.to_json())
                .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize: {}\"}}", e))
        );
    } else {
        println!("{}", value.to_human());
    }
}

// =============================================================================
// services
// =============================================================================

pub struct ServicesOutput<'a> {
    pub currency_symbol: &'a str,
    pub services: &'a [BoostService],
}

impl Outputable for ServicesOutput<'_> {
    fn to_json(&self) -> serde_json::Value {
        let services: Vec<_> = self
            .services
            .iter()
            .map(|service| {
                json!({
                    "slug": service.slug,
                    "name": service.name,
                    "unit_label": service.unit_label,
                    "min_quantity": service.min_quantity,
                    "max_quantity": service.max_quantity,
                    "batch_size": service.batch_size,
                    "starting_price": service.starting_price(),
                    "tiers": service.tiers,
                })
            })
            .collect();
        json!({ "services": services })
    }

    fn to_human(&self) -> String {
        if self.services.is_empty() {
            return "No services in catalog".to_string();
        }

        let mut out = format!(
            "{:<24} {:<28} {:>9} {:>8}  {}\n",
            "SLUG", "NAME", "QUANTITY", "BATCH", "PRICE"
        );
        for service in self.services {
            let batch = service
                .batch_size
                .map(|size| size.to_string())
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "{:<24} {:<28} {:>9} {:>8}  {}\n",
                service.slug,
                service.name,
                format!("{}-{}", service.min_quantity, service.max_quantity),
                batch,
                service.display_from_price(self.currency_symbol),
            ));
        }
        out.trim_end().to_string()
    }
}

// =============================================================================
// price
// =============================================================================

pub struct PriceOutput<'a> {
    pub currency_symbol: &'a str,
    pub unit_label: &'a str,
    pub quote: CheckoutQuote,
}

impl Outputable for PriceOutput<'_> {
    fn to_json(&self) -> serde_json::Value {
        json!({
            "quote": self.quote,
            "line_item_amount_cents": self.quote.line_item_amount_cents(),
            "platform_margin": self.quote.pricing.platform_margin(),
        })
    }

    fn to_human(&self) -> String {
        let symbol = self.currency_symbol;
        let quote = &self.quote;
        let mut out = String::new();

        if quote.clamped {
            out.push_str(&format!(
                "Requested {} clamped to {}\n\n",
                quote.requested_quantity, quote.quantity
            ));
        }

        out.push_str(&format!(
            "{:<12} {:>6} {:>10} {:>12} {:>10} {:>12}\n",
            "TIER", "UNITS", "PRICE", "SUBTOTAL", "PAYOUT", "PAYOUT SUB"
        ));
        for line in &quote.pricing.breakdown {
            out.push_str(&format!(
                "{:<12} {:>6} {:>10} {:>12} {:>10} {:>12}\n",
                line.range_label(),
                line.units_in_tier,
                line.price_per_unit.display_with(symbol),
                line.subtotal.display_with(symbol),
                line.payout_per_unit.display_with(symbol),
                line.payout_subtotal.display_with(symbol),
            ));
        }

        out.push_str(&format!(
            "\nTotal:   {} for {} {}(s) (avg {})\n\
             Payout:  {}\n\
             Margin:  {}",
            quote.pricing.total_price.display_with(symbol),
            quote.quantity,
            self.unit_label,
            quote.unit_amount_display(symbol),
            quote.pricing.total_payout.display_with(symbol),
            quote.pricing.platform_margin().display_with(symbol),
        ));
        out
    }
}

// =============================================================================
// batches
// =============================================================================

pub struct BatchesOutput<'a> {
    pub currency_symbol: &'a str,
    pub slug: &'a str,
    pub quantity: i64,
    pub batches: Vec<Batch>,
    /// Payout for the whole order priced in one piece.
    pub order_payout: Money,
}

impl BatchesOutput<'_> {
    pub fn batch_payout(&self) -> Money {
        self.batches.iter().map(|batch| batch.payout).sum()
    }

    pub fn reconciles(&self) -> bool {
        self.batch_payout() == self.order_payout
    }
}

impl Outputable for BatchesOutput<'_> {
    fn to_json(&self) -> serde_json::Value {
        json!({
            "service_slug": self.slug,
            "quantity": self.quantity,
            "batches": self.batches,
            "batch_payout": self.batch_payout(),
            "order_payout": self.order_payout,
            "reconciled": self.reconciles(),
        })
    }

    fn to_human(&self) -> String {
        let symbol = self.currency_symbol;
        let mut out = format!("{:>5} {:>12} {:>6} {:>10}\n", "BATCH", "UNITS", "COUNT", "PAYOUT");
        for batch in &self.batches {
            out.push_str(&format!(
                "{:>5} {:>12} {:>6} {:>10}\n",
                batch.batch_number,
                format!("{}-{}", batch.first_unit, batch.last_unit),
                batch.unit_count,
                batch.payout.display_with(symbol),
            ));
        }

        let status = if self.reconciles() { "ok" } else { "MISMATCH" };
        out.push_str(&format!(
            "\nBatch payouts: {} (order payout {}, {})",
            self.batch_payout().display_with(symbol),
            self.order_payout.display_with(symbol),
            status,
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boostline_core::{quote_checkout, PricingTier, TierTable, UnitRate};

    fn service() -> BoostService {
        let tiers = TierTable::new(vec![
            PricingTier::new(1, 10, UnitRate::from_cents(500), UnitRate::from_cents(200)),
            PricingTier::new(11, 30, UnitRate::from_cents(400), UnitRate::from_cents(150)),
        ])
        .unwrap();
        BoostService::new("ranked-wins", "Ranked Wins", "win", 1, 30, Some(10), tiers).unwrap()
    }

    #[test]
    fn test_services_table() {
        let services = vec![service()];
        let out = ServicesOutput { currency_symbol: "$", services: &services }.to_human();
        assert!(out.starts_with("SLUG"));
        assert!(out.contains("ranked-wins"));
        assert!(out.contains("1-30"));
        assert!(out.contains("From $5.00 per win"));
    }

    #[test]
    fn test_services_json_keeps_rates_as_strings() {
        let services = vec![service()];
        let value = ServicesOutput { currency_symbol: "$", services: &services }.to_json();
        assert_eq!(value["services"][0]["starting_price"], "5.00");
        assert_eq!(value["services"][0]["tiers"][1]["min_quantity"], 11);
    }

    #[test]
    fn test_price_output() {
        let quote = quote_checkout(&service(), 45).unwrap();
        let output = PriceOutput { currency_symbol: "$", unit_label: "win", quote };

        let text = output.to_human();
        assert!(text.starts_with("Requested 45 clamped to 30"));
        assert!(text.contains("11-30"));
        assert!(text.contains("Total:   $130.00 for 30 win(s)"));
        assert!(text.contains("Margin:  $80.00"));

        let value = output.to_json();
        assert_eq!(value["line_item_amount_cents"], 13000);
        assert_eq!(value["quote"]["clamped"], true);
    }

    #[test]
    fn test_batches_reconcile() {
        let service = service();
        let batches = boostline_core::calculate_batches(25, 10, &service.tiers).unwrap();
        let output = BatchesOutput {
            currency_symbol: "$",
            slug: "ranked-wins",
            quantity: 25,
            batches,
            order_payout: Money::from_cents(4250),
        };

        assert!(output.reconciles());
        assert!(output.to_human().ends_with("(order payout $42.50, ok)"));
        assert_eq!(output.to_json()["reconciled"], true);
    }
}
