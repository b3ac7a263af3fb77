// cartkit/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Invalid product: {reason}")]
  InvalidProduct { reason: String },

  /// The in-memory cart was mutated but could not be written back.
  /// Nothing is rolled back when this is returned.
  #[error("Failed to persist cart under key '{key}'. Source: {source}")]
  Persist {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Storage backend failed while reading key '{key}'. Source: {source}")]
  Storage {
    key: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Invalid storage key: '{key}'")]
  InvalidKey { key: String },

  #[error("Cart record (de)serialization failed: {0}")]
  Serialization(#[from] serde_json::Error),

  #[error("Cannot check out an empty cart")]
  EmptyCart,

  #[error("Configuration error: {0}")]
  Config(String),
}

impl CartError {
  /// True when the error reports a failed write after a successful in-memory mutation.
  pub fn is_persistence(&self) -> bool {
    matches!(self, CartError::Persist { .. })
  }

  pub(crate) fn invalid_product(reason: impl Into<String>) -> Self {
    CartError::InvalidProduct { reason: reason.into() }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
