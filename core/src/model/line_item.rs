// cartkit/src/model/line_item.rs

use crate::model::price::Price;
use crate::model::product::{Product, ProductId};
use serde::{Deserialize, Serialize};

/// One distinct product held in the cart.
///
/// Display fields are copied from the catalog on first add and are not refreshed
/// afterwards. `quantity` is at least 1 for every item stored in a `Cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
  pub id: ProductId,
  pub name: String,
  pub price: Price,
  #[serde(default)]
  pub image: String,
  pub quantity: u32,
}

impl LineItem {
  pub fn from_product(product: &Product) -> Self {
    LineItem {
      id: product.id,
      name: product.name.clone(),
      price: product.price,
      image: product.image.clone(),
      quantity: 1,
    }
  }

  pub fn subtotal(&self) -> Price {
    self.price.times(self.quantity)
  }
}
