// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use cartkit::{Cart, CartEvent, CartEventKind, Price, Product};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::Level;

// --- Product fixtures ---
pub fn product(id: u64, name: &str, price: f64) -> Product {
  Product::new(id, name, Price::from_decimal(price).unwrap(), format!("img/product-{}.jpg", id))
}

pub fn headphones() -> Product {
  product(1, "Wireless Headphones", 10.0)
}

pub fn mug() -> Product {
  product(2, "Coffee Mug", 5.0)
}

pub fn notebook() -> Product {
  product(3, "Notebook", 7.5)
}

// --- Recording observer ---

/// What an observer saw at notification time.
#[derive(Debug, Clone)]
pub struct Seen {
  pub event: CartEvent,
  pub item_count: u64,
  pub total: Price,
  /// Raw storage record at the moment of notification, when a snapshot source was attached.
  pub stored_record: Option<String>,
}

#[derive(Clone, Default)]
pub struct Recorder {
  seen: Arc<Mutex<Vec<Seen>>>,
}

impl Recorder {
  pub fn new() -> Self {
    Self::default()
  }

  /// An observer closure that appends to this recorder.
  pub fn observer(&self) -> impl Fn(&CartEvent, &Cart) + Send + Sync + 'static {
    self.observer_with_snapshot(|| None)
  }

  /// Like `observer`, also capturing `snapshot()` (typically a raw storage read) at notification time.
  pub fn observer_with_snapshot(
    &self,
    snapshot: impl Fn() -> Option<String> + Send + Sync + 'static,
  ) -> impl Fn(&CartEvent, &Cart) + Send + Sync + 'static {
    let seen = self.seen.clone();
    move |event: &CartEvent, cart: &Cart| {
      seen.lock().push(Seen {
        event: event.clone(),
        item_count: cart.item_count(),
        total: cart.total(),
        stored_record: snapshot(),
      });
    }
  }

  pub fn all(&self) -> Vec<Seen> {
    self.seen.lock().clone()
  }

  pub fn kinds(&self) -> Vec<CartEventKind> {
    self.seen.lock().iter().map(|s| s.event.kind.clone()).collect()
  }

  pub fn len(&self) -> usize {
    self.seen.lock().len()
  }

  pub fn last(&self) -> Option<Seen> {
    self.seen.lock().last().cloned()
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
