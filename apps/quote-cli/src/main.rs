//! # boostline-quote
//!
//! Operator CLI over the Boostline service catalog.
//!
//! ## Commands
//! ```text
//! boostline-quote services                         list services
//! boostline-quote price <slug> <qty>               checkout quote
//! boostline-quote batches <slug> <qty> [--batch-size N]
//! boostline-quote init [--force]                   write a sample catalog
//!
//! global: --catalog PATH, --json
//! logs:   RUST_LOG (default "info,boostline=debug"), written to stderr
//! ```

mod cli;
mod output;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use boostline_catalog::{Catalog, CatalogConfig, CATALOG_PATH_ENV};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::{BatchesArgs, Cli, Command, InitArgs, PriceArgs};
use crate::output::{print_output, BatchesOutput, PriceOutput, ServicesOutput};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Command::Services => services(cli.catalog, cli.json),
        Command::Price(args) => price(cli.catalog, args, cli.json),
        Command::Batches(args) => batches(cli.catalog, args, cli.json),
        Command::Init(args) => init(cli.catalog, args),
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so `--json` output stays parseable.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,boostline=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_catalog(path: Option<PathBuf>) -> Result<Catalog> {
    Catalog::load(path).context("could not load the service catalog")
}

// =============================================================================
// Commands
// =============================================================================

fn services(catalog_path: Option<PathBuf>, json: bool) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    print_output(
        &ServicesOutput {
            currency_symbol: catalog.currency_symbol(),
            services: catalog.services(),
        },
        json,
    );
    Ok(())
}

fn price(catalog_path: Option<PathBuf>, args: PriceArgs, json: bool) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;
    let service = catalog.service(&args.slug)?;
    let quote = catalog
        .quote(&args.slug, args.quantity)
        .with_context(|| format!("could not price {} x {}", args.quantity, args.slug))?;

    print_output(
        &PriceOutput {
            currency_symbol: catalog.currency_symbol(),
            unit_label: &service.unit_label,
            quote,
        },
        json,
    );
    Ok(())
}

fn batches(catalog_path: Option<PathBuf>, args: BatchesArgs, json: bool) -> Result<()> {
    let catalog = load_catalog(catalog_path)?;

    let batches = catalog
        .batches(&args.slug, args.quantity, args.batch_size)
        .with_context(|| format!("could not batch {} x {}", args.quantity, args.slug))?;
    let order_payout = catalog.price(&args.slug, args.quantity)?.total_payout;

    let output = BatchesOutput {
        currency_symbol: catalog.currency_symbol(),
        slug: &args.slug,
        quantity: args.quantity,
        batches,
        order_payout,
    };
    print_output(&output, json);

    if !output.reconciles() {
        bail!(
            "batch payouts {} do not match order payout {}",
            output.batch_payout(),
            output.order_payout
        );
    }
    Ok(())
}

fn init(catalog_path: Option<PathBuf>, args: InitArgs) -> Result<()> {
    let path = catalog_path
        .or_else(|| std::env::var(CATALOG_PATH_ENV).ok().map(PathBuf::from))
        .or_else(CatalogConfig::default_config_path)
        .context("no catalog path given and no user config directory found")?;

    if path.exists() && !args.force {
        warn!(path = %path.display(), "Catalog already exists");
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    CatalogConfig::sample().save(&path)?;
    info!(path = %path.display(), "Sample catalog written");
    println!("Wrote sample catalog to {}", path.display());
    Ok(())
}
