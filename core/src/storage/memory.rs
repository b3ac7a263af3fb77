// cartkit/src/storage/memory.rs

use crate::error::{CartError, CartResult};
use crate::storage::KeyValueStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{event, Level};

#[derive(Debug, Default)]
struct Inner {
  records: RwLock<HashMap<String, String>>,
  fail_writes: AtomicBool,
}

/// Process-local storage. Clones share the same records, which lets a test
/// open a second store over the "same browser storage".
#[derive(Debug, Clone, Default)]
pub struct MemoryStore(Arc<Inner>);

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds a raw record, bypassing the cart serializer.
  pub fn with_record(self, key: impl Into<String>, record: impl Into<String>) -> Self {
    self.0.records.write().insert(key.into(), record.into());
    self
  }

  /// Makes subsequent `save` and `remove` calls fail, as a full quota would.
  pub fn fail_writes(&self, fail: bool) {
    self.0.fail_writes.store(fail, Ordering::SeqCst);
  }

  pub fn raw(&self, key: &str) -> Option<String> {
    self.0.records.read().get(key).cloned()
  }

  pub fn len(&self) -> usize {
    self.0.records.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn check_writable(&self, key: &str) -> CartResult<()> {
    if self.0.fail_writes.load(Ordering::SeqCst) {
      event!(Level::DEBUG, %key, "Simulated storage write failure.");
      return Err(CartError::Persist {
        key: key.to_string(),
        source: anyhow::anyhow!("storage quota exceeded"),
      });
    }
    Ok(())
  }
}

impl KeyValueStore for MemoryStore {
  fn load(&self, key: &str) -> CartResult<Option<String>> {
    Ok(self.raw(key))
  }

  fn save(&self, key: &str, record: &str) -> CartResult<()> {
    self.check_writable(key)?;
    self.0.records.write().insert(key.to_string(), record.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> CartResult<bool> {
    self.check_writable(key)?;
    Ok(self.0.records.write().remove(key).is_some())
  }
}
