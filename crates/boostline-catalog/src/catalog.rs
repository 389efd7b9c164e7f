//! # Service Catalog
//!
//! Validated services indexed by slug, plus thin wrappers that resolve a
//! slug and call into the pricing core.
//!
//! ## Build Flow
//! ```text
//! CatalogConfig ──► for each ServiceConfig:
//!                     TierTable::new(tiers)          (gaps, overlaps, order)
//!                     max_quantity or table max
//!                     batch_size or [defaults]
//!                     BoostService::new(...)         (limits, coverage)
//!                     slug not seen before
//!                ──► Catalog { services, index }
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use boostline_core::{
    calculate_batches, calculate_tiered_price, fulfillment_summary, plan_fulfillment,
    quote_checkout, Batch, BoostService, CheckoutQuote, CoreError, FulfillmentJob, PaidOrder,
    TierTable, TieredPriceResult,
};
use tracing::{debug, info, warn};

use crate::config::{CatalogConfig, ServiceConfig};
use crate::error::{CatalogError, CatalogResult};

/// The set of purchasable services.
#[derive(Debug, Clone)]
pub struct Catalog {
    currency_symbol: String,
    services: Vec<BoostService>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Loads configuration (see [`CatalogConfig::load`]) and builds the catalog.
    pub fn load(config_path: Option<PathBuf>) -> CatalogResult<Self> {
        let config = CatalogConfig::load(config_path)?;
        Self::from_config(&config)
    }

    /// Builds and validates every service in a configuration.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        config.validate()?;

        let mut services = Vec::with_capacity(config.services.len());
        let mut index = HashMap::with_capacity(config.services.len());

        for entry in &config.services {
            let service = build_service(entry, config).map_err(|source| {
                CatalogError::InvalidService {
                    slug: entry.slug.clone(),
                    source,
                }
            })?;

            if index.contains_key(&service.slug) {
                return Err(CatalogError::DuplicateService(service.slug));
            }

            debug!(
                slug = %service.slug,
                tiers = service.tiers.len(),
                max_quantity = service.max_quantity,
                batch_size = ?service.batch_size,
                "Service registered"
            );
            index.insert(service.slug.clone(), services.len());
            services.push(service);
        }

        info!(services = services.len(), currency = %config.currency.code, "Catalog ready");

        Ok(Catalog {
            currency_symbol: config.currency.symbol.clone(),
            services,
            index,
        })
    }

    /// All services in file order.
    pub fn services(&self) -> &[BoostService] {
        &self.services
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Looks up a service by slug.
    pub fn service(&self, slug: &str) -> CatalogResult<&BoostService> {
        self.index
            .get(slug)
            .map(|&i| &self.services[i])
            .ok_or_else(|| CatalogError::UnknownService(slug.to_string()))
    }

    /// Prices `quantity` units of a service without clamping.
    pub fn price(&self, slug: &str, quantity: i64) -> CatalogResult<TieredPriceResult> {
        let service = self.service(slug)?;
        Ok(calculate_tiered_price(quantity, &service.tiers)?)
    }

    /// Checkout quote: non-positive quantities fail, others are clamped.
    pub fn quote(&self, slug: &str, requested_quantity: i64) -> CatalogResult<CheckoutQuote> {
        let service = self.service(slug)?;
        let quote = quote_checkout(service, requested_quantity)?;

        if quote.clamped {
            warn!(
                slug,
                requested = quote.requested_quantity,
                priced = quote.quantity,
                "Quantity clamped to service limits"
            );
        }

        Ok(quote)
    }

    /// Splits an order into batches.
    ///
    /// `batch_size` overrides the service's own. Unbatched services with no
    /// override come back as a single batch covering the whole order.
    pub fn batches(
        &self,
        slug: &str,
        quantity: i64,
        batch_size: Option<i64>,
    ) -> CatalogResult<Vec<Batch>> {
        let service = self.service(slug)?;
        let size = batch_size.or(service.batch_size).unwrap_or(quantity);
        Ok(calculate_batches(quantity, size, &service.tiers)?)
    }

    /// Plans booster jobs for a paid order.
    pub fn plan(&self, order: &PaidOrder) -> CatalogResult<Vec<FulfillmentJob>> {
        let service = self.service(&order.service_slug)?;
        let jobs = plan_fulfillment(order, service)?;

        let summary = fulfillment_summary(&jobs);
        info!(
            order_id = %order.id,
            slug = %order.service_slug,
            jobs = summary.job_count,
            units = summary.unit_count,
            payout = %summary.total_payout.display_with(self.currency_symbol()),
            "Fulfillment planned"
        );

        Ok(jobs)
    }
}

fn build_service(
    entry: &ServiceConfig,
    config: &CatalogConfig,
) -> Result<BoostService, CoreError> {
    let tiers = TierTable::new(entry.tiers.clone())?;
    let max_quantity = entry
        .max_quantity
        .unwrap_or_else(|| tiers.max_covered_quantity());

    BoostService::new(
        entry.slug.as_str(),
        entry.name.as_str(),
        entry.unit_label.as_str(),
        entry.min_quantity,
        max_quantity,
        entry.effective_batch_size(&config.defaults),
        tiers,
    )
}

// =============================================================================
// Unit Tests
// =============================================================================
