mod cart;
mod catalog;
mod render;

use clap::{Parser, Subcommand};
use shopfront_cart::FileIdentityStore;
use shopfront_storefront::StorefrontClient;
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "shopfront")]
#[command(about = "Storefront command line client: browse the catalog and manage a cart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products in the catalog
    Products {
        /// Products per page (defaults to `SHOPFRONT_PAGE_SIZE`)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=250))]
        limit: Option<u32>,

        /// Cursor returned by a previous page
        #[arg(long, conflicts_with = "all")]
        after: Option<String>,

        /// Follow every page and print the full catalog
        #[arg(long)]
        all: bool,
    },
    /// List collections
    Collections {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=250))]
        limit: Option<u32>,
    },
    /// Show a collection and its first products
    Collection {
        handle: String,

        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=250))]
        limit: Option<u32>,
    },
    /// Show product detail: options, variants and prices
    Product { handle: String },
    /// Inspect and change the shopping cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = shopfront_core::load_app_config_from_env()?;
    init_tracing(&config.log_level)?;
    tracing::debug!(
        env = %config.env,
        store = %config.store_domain,
        api_version = %config.api_version,
        "configuration loaded"
    );

    let client = StorefrontClient::from_config(&config)?;
    let page_size = config.page_size;

    match cli.command {
        Commands::Products { limit, after, all } => {
            catalog::run_products(&client, limit.unwrap_or(page_size), after.as_deref(), all)
                .await
        }
        Commands::Collections { limit } => {
            catalog::run_collections(&client, limit.unwrap_or(page_size)).await
        }
        Commands::Collection { handle, limit } => {
            catalog::run_collection(&client, &handle, limit.unwrap_or(page_size)).await
        }
        Commands::Product { handle } => catalog::run_product(&client, &handle).await,
        Commands::Cart { command } => {
            let store = FileIdentityStore::new(config.cart_state_path);
            cart::run_cart(command, client, store).await
        }
    }
}

/// Logs go to stderr so command output on stdout stays pipeable.
/// `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}
