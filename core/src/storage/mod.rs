// cartkit/src/storage/mod.rs

//! Key-value persistence behind the cart store.
//!
//! The store writes the whole cart record under one fixed key after every
//! mutation and reads it back once at construction. Backends only move opaque
//! text records; parsing stays in [`Cart`](crate::cart::Cart).

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::{CartError, CartResult};
use std::sync::Arc;

/// Key under which the cart record is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// A durable string-to-string map, in the manner of a browser's local storage.
///
/// Implementations report write failures as [`CartError::Persist`] and read
/// failures as [`CartError::Storage`].
pub trait KeyValueStore: Send + Sync {
  /// Returns the record under `key`, or `None` if nothing was ever saved there.
  fn load(&self, key: &str) -> CartResult<Option<String>>;

  /// Overwrites the record under `key`.
  fn save(&self, key: &str, record: &str) -> CartResult<()>;

  /// Deletes the record under `key`, returning whether one existed.
  fn remove(&self, key: &str) -> CartResult<bool>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
  fn load(&self, key: &str) -> CartResult<Option<String>> {
    (**self).load(key)
  }

  fn save(&self, key: &str, record: &str) -> CartResult<()> {
    (**self).save(key, record)
  }

  fn remove(&self, key: &str) -> CartResult<bool> {
    (**self).remove(key)
  }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
  fn load(&self, key: &str) -> CartResult<Option<String>> {
    (**self).load(key)
  }

  fn save(&self, key: &str, record: &str) -> CartResult<()> {
    (**self).save(key, record)
  }

  fn remove(&self, key: &str) -> CartResult<bool> {
    (**self).remove(key)
  }
}

/// Storage keys double as file names, so they are limited to
/// `[A-Za-z0-9_.-]` and may not start with a dot.
pub fn validate_key(key: &str) -> CartResult<()> {
  let valid = !key.is_empty()
    && !key.starts_with('.')
    && key
      .chars()
      .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
  if valid {
    Ok(())
  } else {
    Err(CartError::InvalidKey { key: key.to_string() })
  }
}
