// cartkit/examples/file_backed_cart.rs
//
// Run twice to see the cart survive a restart:
//   CART_STORAGE_DIR=/tmp/cartkit cargo run --example file_backed_cart

use cartkit::{CartResult, CartStore, Price, Product, SharedCart, StoreConfig};
use tracing::{info, warn};

fn main() -> CartResult<()> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .init();

  let config = StoreConfig::from_env()?;
  if config.storage_dir.is_none() {
    warn!("CART_STORAGE_DIR is not set; the cart will only live in memory.");
  }

  let store = CartStore::from_config(config.open_storage()?, &config)?;
  info!(items = store.item_count(), total = %store.total(), "Cart restored.");

  let shared = SharedCart::new(store);
  shared.write().subscribe(|event: &cartkit::CartEvent, cart: &cartkit::Cart| {
    info!(kind = ?event.kind, count = cart.item_count(), total = %cart.total(), "Cart changed.");
  });

  // The product grid and the sidebar each hold a handle to the same store.
  let product_grid = shared.clone();
  let sidebar = shared.clone();

  let mug = Product::new(42, "Coffee Mug", Price::from_decimal(8.5)?, "img/mug.jpg");
  product_grid.with_write(|store| store.add_item(&mug))?;

  let total = sidebar.with_read(|store| store.total());
  info!(%total, "Sidebar total after adding a mug.");
  Ok(())
}
