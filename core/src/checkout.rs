// cartkit/src/checkout.rs

//! Checkout stub. There is no order processing behind it: it only checks that
//! there is something to buy and reports what the order would contain.

use crate::cart::Cart;
use crate::error::{CartError, CartResult};
use crate::model::Price;
use tracing::{event, Level};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSummary {
  pub total: Price,
  pub item_count: u64,
  pub line_items: usize,
}

impl CheckoutSummary {
  pub fn message(&self) -> String {
    format!("Proceeding to checkout with {} total", self.total)
  }
}

/// Fails with [`CartError::EmptyCart`] when there is nothing in the cart.
pub fn begin(cart: &Cart) -> CartResult<CheckoutSummary> {
  if cart.is_empty() {
    event!(Level::INFO, "Checkout refused: cart is empty.");
    return Err(CartError::EmptyCart);
  }
  let summary = CheckoutSummary {
    total: cart.total(),
    item_count: cart.item_count(),
    line_items: cart.len(),
  };
  event!(Level::INFO, total = %summary.total, item_count = summary.item_count, "Checkout started.");
  Ok(summary)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::LineItem;
  use crate::model::ProductId;

  #[test]
  fn empty_carts_cannot_check_out() {
    assert!(matches!(begin(&Cart::new()), Err(CartError::EmptyCart)));
  }

  #[test]
  fn summary_reports_totals() {
    let cart = Cart::from_items(vec![LineItem {
      id: ProductId(1),
      name: "Kettle".to_string(),
      price: Price::from_cents(3499).unwrap(),
      image: String::new(),
      quantity: 2,
    }]);
    let summary = begin(&cart).unwrap();
    assert_eq!(summary.total, Price::from_cents(6998).unwrap());
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.line_items, 1);
    assert_eq!(summary.message(), "Proceeding to checkout with $69.98 total");
  }
}
