// cartkit/src/cart/store.rs

//! `CartStore`: the single owner of a cart.
//!
//! Every mutating operation follows the same sequence:
//!  1. apply the change to the in-memory `Cart`,
//!  2. write the full cart record under the store's key (overwrite),
//!  3. notify each observer exactly once with a `CartEvent`.
//!
//! A failed write does not undo step 1. The operation still notifies and then
//! returns `Err(CartError::Persist { .. })` so the caller can surface a warning.

use crate::cart::events::{CartEvent, CartEventKind, CartObserver, Notification, Observers, SubscriptionId};
use crate::cart::{Cart, QuantityChange};
use crate::checkout::{self, CheckoutSummary};
use crate::config::StoreConfig;
use crate::error::{CartError, CartResult};
use crate::model::{LineItem, Price, Product, ProductId};
use crate::storage::{validate_key, KeyValueStore, DEFAULT_STORAGE_KEY};
use tracing::{event, instrument, Level};

#[derive(Debug)]
pub struct CartStore<S: KeyValueStore> {
  storage: S,
  key: String,
  cart: Cart,
  observers: Observers,
}

impl<S: KeyValueStore> CartStore<S> {
  /// Opens the store under [`DEFAULT_STORAGE_KEY`], loading whatever record is there.
  pub fn open(storage: S) -> Self {
    let cart = load_cart(&storage, DEFAULT_STORAGE_KEY);
    CartStore {
      storage,
      key: DEFAULT_STORAGE_KEY.to_string(),
      cart,
      observers: Observers::default(),
    }
  }

  /// Opens the store under a custom key. A missing or unreadable record yields an empty cart.
  pub fn open_with_key(storage: S, key: impl Into<String>) -> CartResult<Self> {
    let key = key.into();
    validate_key(&key)?;
    let cart = load_cart(&storage, &key);
    Ok(CartStore {
      storage,
      key,
      cart,
      observers: Observers::default(),
    })
  }

  pub fn from_config(storage: S, config: &StoreConfig) -> CartResult<Self> {
    Self::open_with_key(storage, config.storage_key.clone())
  }

  // --- Queries ---

  /// Read-only view of the owned cart.
  pub fn cart(&self) -> &Cart {
    &self.cart
  }

  pub fn items(&self) -> &[LineItem] {
    self.cart.items()
  }

  pub fn get(&self, id: ProductId) -> Option<&LineItem> {
    self.cart.get(id)
  }

  pub fn contains(&self, id: ProductId) -> bool {
    self.cart.contains(id)
  }

  pub fn len(&self) -> usize {
    self.cart.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cart.is_empty()
  }

  pub fn total(&self) -> Price {
    self.cart.total()
  }

  pub fn item_count(&self) -> u64 {
    self.cart.item_count()
  }

  pub fn storage_key(&self) -> &str {
    &self.key
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  // --- Observers ---

  pub fn subscribe(&mut self, observer: impl CartObserver + 'static) -> SubscriptionId {
    self.observers.add(Box::new(observer))
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    self.observers.remove(id)
  }

  pub fn observer_count(&self) -> usize {
    self.observers.len()
  }

  // --- Mutations ---

  /// Adds one unit of `product`. A product already in the cart has its quantity
  /// incremented; otherwise a new line item is appended with quantity 1.
  ///
  /// Products with a blank name are rejected before anything changes.
  #[instrument(name = "CartStore::add_item", skip_all, fields(product_id = %product.id, key = %self.key))]
  pub fn add_item(&mut self, product: &Product) -> CartResult<()> {
    product.validate()?;
    let quantity = self.cart.add(product);
    event!(Level::DEBUG, quantity, "Item added.");
    let notification = Notification::success(format!("{} added to cart!", product.name));
    self.commit(CartEventKind::ItemAdded { id: product.id, quantity }, Some(notification))
  }

  /// Removes the line item for `id`. Removing an absent id is not an error;
  /// it still writes and notifies.
  #[instrument(name = "CartStore::remove_item", skip_all, fields(product_id = %id, key = %self.key))]
  pub fn remove_item(&mut self, id: ProductId) -> CartResult<()> {
    let existed = self.cart.remove(id).is_some();
    event!(Level::DEBUG, existed, "Item removal processed.");
    self.commit(
      CartEventKind::ItemRemoved { id, existed },
      Some(Notification::success("Item removed from cart!")),
    )
  }

  /// Applies a relative quantity change. A resulting quantity below 1 removes
  /// the line item. Unknown ids are a no-op that still writes and notifies.
  #[instrument(name = "CartStore::update_quantity", skip_all, fields(product_id = %id, change = change, key = %self.key))]
  pub fn update_quantity(&mut self, id: ProductId, change: i64) -> CartResult<()> {
    let outcome = self.cart.adjust(id, change);
    event!(Level::DEBUG, ?outcome, "Quantity change applied.");
    let notification = match outcome {
      QuantityChange::Removed => Some(Notification::success("Item removed from cart!")),
      QuantityChange::Missing | QuantityChange::Updated(_) => None,
    };
    self.commit(CartEventKind::QuantityChanged { id, change: outcome }, notification)
  }

  /// Sets an absolute quantity by translating it into a relative change.
  /// Setting 0 removes the line item.
  pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> CartResult<()> {
    let current = self.cart.get(id).map_or(0, |item| i64::from(item.quantity));
    self.update_quantity(id, i64::from(quantity) - current)
  }

  #[instrument(name = "CartStore::clear", skip_all, fields(key = %self.key))]
  pub fn clear(&mut self) -> CartResult<()> {
    let dropped = self.cart.len();
    self.cart.clear();
    event!(Level::DEBUG, dropped, "Cart cleared.");
    self.commit(CartEventKind::Cleared, None)
  }

  /// Re-reads the persisted record, replacing the in-memory cart, and notifies.
  /// Nothing is written back.
  #[instrument(name = "CartStore::reload", skip_all, fields(key = %self.key))]
  pub fn reload(&mut self) {
    let cart = load_cart(&self.storage, &self.key);
    self.cart.replace(cart);
    let reloaded = CartEvent::new(CartEventKind::Reloaded);
    self.observers.notify(&reloaded, &self.cart);
  }

  /// Starts the checkout stub. Observers receive the resulting notification;
  /// the cart itself is left as is.
  #[instrument(name = "CartStore::checkout", skip_all, fields(key = %self.key))]
  pub fn checkout(&mut self) -> CartResult<CheckoutSummary> {
    match checkout::begin(&self.cart) {
      Ok(summary) => {
        let started = CartEvent::new(CartEventKind::CheckoutStarted { total: summary.total })
          .with_notification(Notification::success(summary.message()));
        self.observers.notify(&started, &self.cart);
        Ok(summary)
      }
      Err(err) => {
        let rejected = CartEvent::new(CartEventKind::CheckoutRejected).with_notification(Notification::error("Your cart is empty!"));
        self.observers.notify(&rejected, &self.cart);
        Err(err)
      }
    }
  }

  /// Writes the cart, then notifies. Returns the write outcome.
  fn commit(&mut self, kind: CartEventKind, notification: Option<Notification>) -> CartResult<()> {
    let written = self.persist();
    let mut cart_event = CartEvent::after_write(kind, written.is_ok());
    cart_event.notification = notification;
    self.observers.notify(&cart_event, &self.cart);
    written
  }

  fn persist(&self) -> CartResult<()> {
    let record = self.cart.to_record()?;
    match self.storage.save(&self.key, &record) {
      Ok(()) => {
        event!(Level::TRACE, key = %self.key, bytes = record.len(), "Cart persisted.");
        Ok(())
      }
      Err(err) => {
        event!(Level::WARN, key = %self.key, error = %err, "Cart write failed; in-memory cart keeps the change.");
        if err.is_persistence() {
          Err(err)
        } else {
          Err(CartError::Persist {
            key: self.key.clone(),
            source: anyhow::Error::new(err),
          })
        }
      }
    }
  }
}

/// Loads the cart stored under `key`. Absent, unreadable and corrupt records all
/// yield an empty cart.
fn load_cart<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Cart {
  let record = match storage.load(key) {
    Ok(Some(record)) => record,
    Ok(None) => {
      event!(Level::INFO, %key, "No stored cart; starting empty.");
      return Cart::new();
    }
    Err(err) => {
      event!(Level::WARN, %key, error = %err, "Stored cart unreadable; starting empty.");
      return Cart::new();
    }
  };
  match Cart::from_record(&record) {
    Ok(cart) => {
      event!(Level::INFO, %key, items = cart.len(), count = cart.item_count(), "Stored cart loaded.");
      cart
    }
    Err(err) => {
      event!(Level::WARN, %key, error = %err, "Stored cart is malformed; starting empty.");
      Cart::new()
    }
  }
}
