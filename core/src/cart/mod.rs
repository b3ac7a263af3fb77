// cartkit/src/cart/mod.rs

//! The cart collection and the store that owns it.
//!
//! `Cart` is the ordered, id-unique list of line items together with its pure
//! queries. Its mutators are crate-private: outside code changes a cart only
//! through [`CartStore`], which keeps persistence and observers in step with
//! every change.

pub mod events;
pub mod handle;
pub mod store;

pub use events::{CartEvent, CartEventKind, CartObserver, Notification, NotificationKind, SubscriptionId};
pub use handle::SharedCart;
pub use store::CartStore;

use crate::error::CartResult;
use crate::model::{LineItem, Price, Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::{event, Level};

/// Result of applying a relative quantity change to one line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
  /// No line item has the requested id.
  Missing,
  /// The item stays in the cart with this quantity.
  Updated(u32),
  /// The candidate quantity dropped below 1, so the item was removed.
  Removed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
  items: Vec<LineItem>,
}

impl Cart {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a cart from raw line items, restoring the collection invariants:
  /// items with quantity 0 are dropped and repeated ids are merged into the
  /// first occurrence with their quantities summed.
  pub fn from_items(raw: Vec<LineItem>) -> Self {
    let mut items: Vec<LineItem> = Vec::with_capacity(raw.len());
    for item in raw {
      if item.quantity == 0 {
        event!(Level::DEBUG, product_id = %item.id, "Dropping line item with zero quantity.");
        continue;
      }
      match items.iter_mut().find(|existing| existing.id == item.id) {
        Some(existing) => {
          event!(Level::DEBUG, product_id = %item.id, "Merging duplicate line item.");
          existing.quantity = existing.quantity.saturating_add(item.quantity);
        }
        None => items.push(item),
      }
    }
    Cart { items }
  }

  /// Parses a persisted record.
  ///
  /// Only a record that is not a JSON array fails as a whole. Entries that do
  /// not parse as a line item (missing fields, negative or fractional
  /// quantities, bad prices) are dropped one by one, and the rest is repaired
  /// the same way as [`Cart::from_items`].
  pub fn from_record(record: &str) -> CartResult<Self> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(record)?;
    let raw = entries
      .into_iter()
      .enumerate()
      .filter_map(|(index, entry)| match serde_json::from_value::<LineItem>(entry) {
        Ok(item) => Some(item),
        Err(e) => {
          event!(Level::WARN, index, error = %e, "Dropping malformed line item from stored record.");
          None
        }
      })
      .collect();
    Ok(Self::from_items(raw))
  }

  pub fn to_record(&self) -> CartResult<String> {
    Ok(serde_json::to_string(&self.items)?)
  }

  /// Line items in insertion order.
  pub fn items(&self) -> &[LineItem] {
    &self.items
  }

  pub fn get(&self, id: ProductId) -> Option<&LineItem> {
    self.items.iter().find(|item| item.id == id)
  }

  pub fn contains(&self, id: ProductId) -> bool {
    self.get(id).is_some()
  }

  /// Number of distinct line items.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  /// Sum of `price × quantity` over all line items, in exact cents.
  pub fn total(&self) -> Price {
    self.items.iter().map(LineItem::subtotal).sum()
  }

  /// Sum of quantities over all line items.
  pub fn item_count(&self) -> u64 {
    self.items.iter().map(|item| u64::from(item.quantity)).sum()
  }

  /// Adds one unit of `product`, returning the resulting quantity.
  pub(crate) fn add(&mut self, product: &Product) -> u32 {
    match self.items.iter_mut().find(|item| item.id == product.id) {
      Some(item) => {
        item.quantity = item.quantity.saturating_add(1);
        item.quantity
      }
      None => {
        self.items.push(LineItem::from_product(product));
        1
      }
    }
  }

  pub(crate) fn remove(&mut self, id: ProductId) -> Option<LineItem> {
    let index = self.items.iter().position(|item| item.id == id)?;
    Some(self.items.remove(index))
  }

  pub(crate) fn adjust(&mut self, id: ProductId, change: i64) -> QuantityChange {
    let Some(index) = self.items.iter().position(|item| item.id == id) else {
      return QuantityChange::Missing;
    };
    let candidate = i64::from(self.items[index].quantity).saturating_add(change);
    if candidate < 1 {
      self.items.remove(index);
      return QuantityChange::Removed;
    }
    let quantity = u32::try_from(candidate).unwrap_or(u32::MAX);
    self.items[index].quantity = quantity;
    QuantityChange::Updated(quantity)
  }

  pub(crate) fn clear(&mut self) {
    self.items.clear();
  }

  pub(crate) fn replace(&mut self, other: Cart) {
    *self = other;
  }
}
