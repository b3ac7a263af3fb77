// cartkit/src/cart/events.rs

//! Change notifications emitted by [`CartStore`](crate::cart::CartStore).
//!
//! Every mutating store operation produces exactly one [`CartEvent`], delivered
//! to each registered observer after the persistence write. Observers get the
//! event plus read-only access to the cart; they are the display layer's hook.

use crate::cart::{Cart, QuantityChange};
use crate::model::{Price, ProductId};
use std::fmt;
use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
  Success,
  Error,
}

/// A short user-facing message, shown by the display layer as a toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
  pub kind: NotificationKind,
  pub message: String,
}

impl Notification {
  pub fn success(message: impl Into<String>) -> Self {
    Notification {
      kind: NotificationKind::Success,
      message: message.into(),
    }
  }

  pub fn error(message: impl Into<String>) -> Self {
    Notification {
      kind: NotificationKind::Error,
      message: message.into(),
    }
  }
}

impl fmt::Display for Notification {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.message)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEventKind {
  ItemAdded { id: ProductId, quantity: u32 },
  /// `existed` is false when the id was not in the cart (the no-op case).
  ItemRemoved { id: ProductId, existed: bool },
  QuantityChanged { id: ProductId, change: QuantityChange },
  Cleared,
  Reloaded,
  CheckoutStarted { total: Price },
  CheckoutRejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartEvent {
  pub kind: CartEventKind,
  /// Outcome of the write that preceded this event. `None` when nothing was
  /// written (reload, checkout). `Some(false)` means the write failed but the
  /// in-memory cart still changed.
  pub persisted: Option<bool>,
  pub notification: Option<Notification>,
}

impl CartEvent {
  pub(crate) fn new(kind: CartEventKind) -> Self {
    CartEvent {
      kind,
      persisted: None,
      notification: None,
    }
  }

  pub(crate) fn after_write(kind: CartEventKind, written: bool) -> Self {
    CartEvent {
      persisted: Some(written),
      ..Self::new(kind)
    }
  }

  pub(crate) fn with_notification(mut self, notification: Notification) -> Self {
    self.notification = Some(notification);
    self
  }
}

/// Receives cart change notifications. Implemented for any matching closure.
pub trait CartObserver: Send + Sync {
  fn on_cart_changed(&self, event: &CartEvent, cart: &Cart);
}

impl<F> CartObserver for F
where
  F: Fn(&CartEvent, &Cart) + Send + Sync,
{
  fn on_cart_changed(&self, event: &CartEvent, cart: &Cart) {
    self(event, cart)
  }
}

/// Handle returned by `subscribe`, used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub(crate) struct Observers {
  next_id: u64,
  entries: Vec<(SubscriptionId, Box<dyn CartObserver>)>,
}

impl Observers {
  pub(crate) fn add(&mut self, observer: Box<dyn CartObserver>) -> SubscriptionId {
    let id = SubscriptionId(self.next_id);
    self.next_id += 1;
    self.entries.push((id, observer));
    event!(Level::DEBUG, subscription = id.0, observers = self.entries.len(), "Cart observer subscribed.");
    id
  }

  pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
    let before = self.entries.len();
    self.entries.retain(|(entry_id, _)| *entry_id != id);
    before != self.entries.len()
  }

  pub(crate) fn len(&self) -> usize {
    self.entries.len()
  }

  /// Delivers `cart_event` to every observer in subscription order.
  pub(crate) fn notify(&self, cart_event: &CartEvent, cart: &Cart) {
    event!(Level::TRACE, kind = ?cart_event.kind, observers = self.entries.len(), "Notifying cart observers.");
    for (_, observer) in &self.entries {
      observer.on_cart_changed(cart_event, cart);
    }
  }
}

impl fmt::Debug for Observers {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Observers").field("count", &self.entries.len()).finish()
  }
}
