// cartkit/src/cart/handle.rs
use crate::cart::store::CartStore;
use crate::storage::KeyValueStore;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// Shared ownership of one `CartStore`, for handing the same store to the
/// click handlers and the renderer without a global.
///
/// Observers run while the write guard is held. They receive the cart
/// directly and MUST NOT call back into the same handle, or they deadlock.
#[derive(Debug)]
pub struct SharedCart<S: KeyValueStore>(Arc<RwLock<CartStore<S>>>);

impl<S: KeyValueStore> SharedCart<S> {
  pub fn new(store: CartStore<S>) -> Self {
    SharedCart(Arc::new(RwLock::new(store)))
  }

  pub fn read(&self) -> RwLockReadGuard<'_, CartStore<S>> {
    self.0.read()
  }

  pub fn write(&self) -> RwLockWriteGuard<'_, CartStore<S>> {
    self.0.write()
  }

  pub fn with_read<R>(&self, f: impl FnOnce(&CartStore<S>) -> R) -> R {
    f(&self.read())
  }

  pub fn with_write<R>(&self, f: impl FnOnce(&mut CartStore<S>) -> R) -> R {
    f(&mut self.write())
  }

  /// Number of live handles to this store.
  pub fn handle_count(&self) -> usize {
    Arc::strong_count(&self.0)
  }
}

impl<S: KeyValueStore> Clone for SharedCart<S> {
  fn clone(&self) -> Self {
    SharedCart(Arc::clone(&self.0))
  }
}

impl<S: KeyValueStore> From<CartStore<S>> for SharedCart<S> {
  fn from(store: CartStore<S>) -> Self {
    Self::new(store)
  }
}
