//! Legumechanics CLI - the storefront cart from a terminal.
//!
//! The cart slot is kept in a JSON file standing in for browser storage, so
//! consecutive invocations see the same cart.
//!
//! # Usage
//!
//! ```bash
//! # Product grid in display order
//! lm-cli grid
//!
//! # Add one unit, then look at the mini cart
//! lm-cli add energy-bar
//! lm-cli show
//!
//! # Replace the cart with one unit and show the checkout summary
//! lm-cli buy-now pea-protein
//! lm-cli show --checkout
//!
//! # Badge value and formatted total
//! lm-cli count
//! lm-cli total
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use legumechanics_core::{CurrencyCode, Locale, MoneyFormatter, ProductOrder};

mod commands;
mod error;
mod file_store;
mod render;

use commands::Context;

#[derive(Parser)]
#[command(name = "lm-cli")]
#[command(author, version, about = "Legumechanics cart tools")]
struct Cli {
    /// JSON file holding the persisted cart slot
    #[arg(long, env = "LM_STORAGE_PATH", default_value = ".lm-storage.json", global = true)]
    store: PathBuf,

    /// Number formatting locale (`es-ES`, `en-US`)
    #[arg(long, env = "LM_LOCALE", default_value = "es-ES", global = true)]
    locale: Locale,

    /// Display currency (`EUR`, `USD`, `GBP`)
    #[arg(long, env = "LM_CURRENCY", default_value = "EUR", global = true)]
    currency: CurrencyCode,

    /// JSON catalog replacing the built-in products
    #[arg(long, env = "LM_CATALOG_PATH", global = true)]
    catalog: Option<PathBuf>,

    /// Comma-separated product ids for the grid
    #[arg(long, env = "LM_PRODUCT_ORDER", global = true)]
    order: Option<ProductOrder>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the product grid
    Grid,
    /// Show the cart summary (mini cart by default)
    Show {
        /// Use the checkout summary layout
        #[arg(long)]
        checkout: bool,
    },
    /// Add one unit of a product to the cart
    Add {
        /// Product id
        product_id: String,
    },
    /// Replace the cart with one unit of a product
    BuyNow {
        /// Product id
        product_id: String,
    },
    /// Print the cart badge count
    Count,
    /// Print the formatted cart total
    Total,
}

fn main() {
    // Load .env before clap reads env-backed arguments
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "legumechanics_cli=info,legumechanics_core=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(output) => print_output(&output),
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<String, error::CliError> {
    let ctx = Context::load(
        cli.store,
        MoneyFormatter::new(cli.locale, cli.currency),
        cli.order.unwrap_or_default(),
        cli.catalog.as_deref(),
    )?;

    match cli.command {
        Commands::Grid => Ok(commands::grid::grid(&ctx)),
        Commands::Show { checkout } => Ok(commands::cart::show(&ctx, checkout)),
        Commands::Add { product_id } => commands::cart::add(&ctx, &product_id),
        Commands::BuyNow { product_id } => commands::cart::buy_now(&ctx, &product_id),
        Commands::Count => Ok(commands::cart::count(&ctx)),
        Commands::Total => Ok(commands::cart::total(&ctx)),
    }
}

#[allow(clippy::print_stdout)]
fn print_output(output: &str) {
    println!("{output}");
}
