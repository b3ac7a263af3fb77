// cartkit/examples/basic_cart.rs

use cartkit::{Cart, CartEvent, CartResult, CartStore, Catalog, MemoryStore, NotificationKind, Price, Product, ProductId};
use tracing::info;

// A plain-text stand-in for the storefront's cart sidebar.
fn render(event: &CartEvent, cart: &Cart) {
  if let Some(notification) = &event.notification {
    let marker = match notification.kind {
      NotificationKind::Success => "✔",
      NotificationKind::Error => "✖",
    };
    println!("  [{}] {}", marker, notification);
  }
  if event.persisted == Some(false) {
    println!("  (warning: cart could not be saved)");
  }
  println!("  Cart ({} items) total {}", cart.item_count(), cart.total());
  if cart.is_empty() {
    println!("    Your cart is empty");
    return;
  }
  for item in cart.items() {
    println!(
      "    {:<22} {} x{:<3} {}",
      item.name,
      item.price,
      item.quantity,
      item.subtotal()
    );
  }
}

fn main() -> CartResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Cart Example ---");

  let catalog = Catalog::new(vec![
    Product::new(1, "Wireless Headphones", Price::from_decimal(99.99)?, "img/headphones.jpg"),
    Product::new(2, "Smart Watch", Price::from_decimal(199.99)?, "img/watch.jpg"),
    Product::new(3, "Phone Case", Price::from_decimal(19.5)?, "img/case.jpg"),
  ])?;

  let mut store = CartStore::open(MemoryStore::new());
  store.subscribe(render);

  // Click handlers map onto store operations.
  for id in [1, 3, 1] {
    if let Some(product) = catalog.get(ProductId(id)) {
      store.add_item(product)?;
    }
  }
  store.update_quantity(ProductId(3), 1)?;
  store.update_quantity(ProductId(1), -1)?;
  store.remove_item(ProductId(3))?;

  let summary = store.checkout()?;
  info!(total = %summary.total, items = summary.item_count, "Checkout stub finished.");

  store.clear()?;
  if store.checkout().is_err() {
    info!("Checkout refused on empty cart, as expected.");
  }
  Ok(())
}
