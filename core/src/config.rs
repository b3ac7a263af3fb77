// cartkit/src/config.rs

use crate::error::{CartError, CartResult};
use crate::storage::{validate_key, FileStore, KeyValueStore, MemoryStore, DEFAULT_STORAGE_KEY};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

pub const STORAGE_KEY_VAR: &str = "CART_STORAGE_KEY";
pub const STORAGE_DIR_VAR: &str = "CART_STORAGE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
  /// The one key the cart record is saved under.
  pub storage_key: String,
  /// Directory for the file backend. `None` keeps the cart in memory only.
  pub storage_dir: Option<PathBuf>,
}

impl Default for StoreConfig {
  fn default() -> Self {
    StoreConfig {
      storage_key: DEFAULT_STORAGE_KEY.to_string(),
      storage_dir: None,
    }
  }
}

impl StoreConfig {
  /// Reads `CART_STORAGE_KEY` and `CART_STORAGE_DIR`, after loading a `.env` file if present.
  pub fn from_env() -> CartResult<Self> {
    dotenv().ok();

    let storage_key = env::var(STORAGE_KEY_VAR).unwrap_or_else(|_| DEFAULT_STORAGE_KEY.to_string());
    validate_key(&storage_key).map_err(|e| CartError::Config(format!("Invalid {}: {}", STORAGE_KEY_VAR, e)))?;

    let storage_dir = match env::var(STORAGE_DIR_VAR) {
      Ok(dir) if dir.trim().is_empty() => {
        return Err(CartError::Config(format!("{} is set but empty", STORAGE_DIR_VAR)));
      }
      Ok(dir) => Some(PathBuf::from(dir)),
      Err(_) => None,
    };

    tracing::info!(storage_key = %storage_key, file_backed = storage_dir.is_some(), "Cart store configuration loaded.");
    Ok(StoreConfig {
      storage_key,
      storage_dir,
    })
  }

  pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
    self.storage_key = key.into();
    self
  }

  pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
    self.storage_dir = Some(dir.into());
    self
  }

  /// Opens the configured backend: a `FileStore` when a directory is set, otherwise a fresh `MemoryStore`.
  pub fn open_storage(&self) -> CartResult<Box<dyn KeyValueStore>> {
    match &self.storage_dir {
      Some(dir) => Ok(Box::new(FileStore::open(dir.clone())?)),
      None => Ok(Box::new(MemoryStore::new())),
    }
  }
}
