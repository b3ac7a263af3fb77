// cartkit/src/model/product.rs

use crate::error::{CartError, CartResult};
use crate::model::price::Price;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable catalog identifier. Also the key of a line item in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl From<u64> for ProductId {
  fn from(id: u64) -> Self {
    ProductId(id)
  }
}

/// A catalog entry as handed to the cart by the listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub price: Price,
  /// URI or relative path of the product thumbnail.
  #[serde(default)]
  pub image: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl Product {
  pub fn new(id: u64, name: impl Into<String>, price: Price, image: impl Into<String>) -> Self {
    Product {
      id: ProductId(id),
      name: name.into(),
      price,
      image: image.into(),
      description: None,
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  /// Checks the fields a line item copies. Only the display name can be malformed;
  /// the price is validated when the `Price` is built.
  pub fn validate(&self) -> CartResult<()> {
    if self.name.trim().is_empty() {
      return Err(CartError::invalid_product(format!("product {} has an empty name", self.id)));
    }
    Ok(())
  }
}
