//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Price boosting orders against the Boostline service catalog.
#[derive(Parser, Debug)]
#[command(name = "boostline-quote", author, version, about)]
pub struct Cli {
    /// Catalog file (defaults to $BOOSTLINE_CATALOG, then the user config dir).
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List services with their starting prices.
    Services,

    /// Quote an order the way checkout would.
    Price(PriceArgs),

    /// Show how an order splits into booster jobs.
    Batches(BatchesArgs),

    /// Write a sample catalog file.
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Service slug.
    pub slug: String,

    /// Requested quantity.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(Args, Debug)]
pub struct BatchesArgs {
    /// Service slug.
    pub slug: String,

    /// Order quantity.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,

    /// Units per job (defaults to the service's batch size).
    #[arg(long)]
    pub batch_size: Option<i64>,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing catalog.
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_batches_with_globals() {
        let cli = Cli::try_parse_from([
            "boostline-quote",
            "batches",
            "ranked-wins",
            "25",
            "--batch-size",
            "5",
            "--json",
            "--catalog",
            "/tmp/catalog.toml",
        ])
        .unwrap();

        assert!(cli.json);
        assert_eq!(cli.catalog, Some(PathBuf::from("/tmp/catalog.toml")));
        match cli.command {
            Command::Batches(args) => {
                assert_eq!(args.slug, "ranked-wins");
                assert_eq!(args.quantity, 25);
                assert_eq!(args.batch_size, Some(5));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_negative_quantity_reaches_pricing() {
        let cli = Cli::try_parse_from(["boostline-quote", "price", "ranked-wins", "-3"]).unwrap();
        assert!(matches!(cli.command, Command::Price(PriceArgs { quantity: -3, .. })));
    }
}
