//! Cart command handlers.
//!
//! Each invocation is one cart session: the persisted cart is validated
//! against the Storefront, one operation runs, and the result is printed.

use clap::Subcommand;
use shopfront_cart::{CartSync, FileIdentityStore, IdentityStore};
use shopfront_storefront::{checkout_redirect, StorefrontClient};

use crate::render;

type Session = CartSync<StorefrontClient, FileIdentityStore>;

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// Show the current cart
    Show,
    /// Add a product variant to the cart, creating the cart if needed
    Add {
        /// Variant id, e.g. `gid://shopify/ProductVariant/123`
        variant_id: String,

        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Open the cart after a successful add and print it
        #[arg(long)]
        open: bool,
    },
    /// Set the quantity of a cart line; 0 or less removes the line
    Update {
        line_id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line from the cart
    Remove { line_id: String },
    /// Print the checkout URL for the current cart
    Checkout,
    /// Forget the cart persisted on this machine
    Forget,
}

/// Run one cart command.
///
/// # Errors
///
/// Returns an error if a cart mutation fails, the cart is empty at checkout,
/// or (for `forget`) the identity file cannot be written.
pub(crate) async fn run_cart(
    command: CartCommands,
    client: StorefrontClient,
    store: FileIdentityStore,
) -> anyhow::Result<()> {
    match command {
        CartCommands::Show => {
            let sync = start_session(client, store).await;
            print!("{}", render::cart_summary(&sync.state()));
        }
        CartCommands::Add {
            variant_id,
            quantity,
            open,
        } => {
            let sync = start_session(client, store).await;
            sync.add_item(&variant_id, quantity).await?;
            if open {
                sync.open_cart();
            }
            let state = sync.state();
            println!(
                "added {quantity} x {variant_id} ({} items in cart)",
                state.item_count()
            );
            if sync.is_open() {
                print!("{}", render::cart_summary(&state));
            }
        }
        CartCommands::Update { line_id, quantity } => {
            let sync = start_session(client, store).await;
            let snapshot = sync.update_item_quantity(&line_id, quantity).await?;
            match snapshot.line(&line_id) {
                Some(line) => println!("{line_id} now has quantity {}", line.quantity),
                None => println!("removed {line_id}"),
            }
            print!("{}", render::cart_summary(&sync.state()));
        }
        CartCommands::Remove { line_id } => {
            let sync = start_session(client, store).await;
            sync.remove_item(&line_id).await?;
            print!("{}", render::cart_summary(&sync.state()));
        }
        CartCommands::Checkout => {
            let sync = CartSync::new(client, store);
            let state = sync.refresh_cart().await;
            if let Some(error) = state.error() {
                anyhow::bail!("could not load cart: {error}");
            }
            let url = match state.checkout_url() {
                Some(url) if !state.is_empty() => checkout_redirect(url)?,
                _ => anyhow::bail!("cart is empty; add an item before checking out"),
            };
            println!("{url}");
        }
        CartCommands::Forget => {
            store.clear()?;
            tracing::info!(path = %store.path().display(), "cleared persisted cart identity");
            println!("cart forgotten");
        }
    }
    Ok(())
}

async fn start_session(client: StorefrontClient, store: FileIdentityStore) -> Session {
    let sync = CartSync::new(client, store);
    let state = sync.initialize().await;
    if let Some(error) = state.error() {
        tracing::warn!(error, "previous cart could not be restored; starting a new one");
    }
    sync
}
