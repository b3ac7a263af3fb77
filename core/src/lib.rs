// src/lib.rs

//! cartkit: a typed, storage-backed shopping cart for storefront front-ends.
//!
//! The crate centres on [`CartStore`], the single owner of a cart:
//!  - Line items are unique by product id; adding a product twice bumps its quantity.
//!  - Quantities never drop below 1; a change that would do so removes the item.
//!  - Totals are exact, accumulated in whole cents.
//!  - After every mutation the full cart is written to a [`KeyValueStore`]
//!    under one fixed key, and every observer is notified once.
//!  - On construction the stored record is loaded; a missing or corrupt
//!    record starts an empty cart instead of failing.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;

// --- Re-exports for the Public API ---

pub use crate::cart::{
  Cart, CartEvent, CartEventKind, CartObserver, CartStore, Notification, NotificationKind, QuantityChange, SharedCart,
  SubscriptionId,
};
pub use crate::catalog::Catalog;
pub use crate::checkout::CheckoutSummary;
pub use crate::config::StoreConfig;
pub use crate::error::{CartError, CartResult};
pub use crate::model::{LineItem, Price, Product, ProductId};
pub use crate::storage::{FileStore, KeyValueStore, MemoryStore, DEFAULT_STORAGE_KEY};

/*
    Typical wiring:
    1. Build the backend (`MemoryStore`, `FileStore`, or `StoreConfig::open_storage()`).
    2. `CartStore::open(backend)` loads the saved cart.
    3. Subscribe the display layer: `store.subscribe(|event, cart| render(event, cart))`.
    4. Wrap in `SharedCart` if several UI components need the same store.
    5. Map UI events to operations: add button -> `add_item`, +/- -> `update_quantity(id, ±1)`,
       trash -> `remove_item`, checkout -> `checkout`.
*/
