// cartkit/src/catalog.rs

//! The product listing the storefront renders and feeds into the cart.

use crate::error::{CartError, CartResult};
use crate::model::{Product, ProductId};
use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct Catalog {
  products: Vec<Product>,
}

impl Catalog {
  /// Builds a catalog, rejecting invalid products and repeated ids.
  pub fn new(products: Vec<Product>) -> CartResult<Self> {
    let mut seen = HashSet::with_capacity(products.len());
    for product in &products {
      product.validate()?;
      if !seen.insert(product.id) {
        return Err(CartError::invalid_product(format!(
          "product id {} appears more than once in the catalog",
          product.id
        )));
      }
    }
    Ok(Catalog { products })
  }

  /// Parses a JSON array of products, as served to the listing page.
  pub fn from_json(json: &str) -> CartResult<Self> {
    let products: Vec<Product> = serde_json::from_str(json)?;
    Self::new(products)
  }

  pub fn products(&self) -> &[Product] {
    &self.products
  }

  pub fn get(&self, id: ProductId) -> Option<&Product> {
    self.products.iter().find(|product| product.id == id)
  }

  pub fn len(&self) -> usize {
    self.products.len()
  }

  pub fn is_empty(&self) -> bool {
    self.products.is_empty()
  }

  /// Case-insensitive substring match on name and description.
  /// A blank query matches everything.
  pub fn search(&self, query: &str) -> Vec<&Product> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
      return self.products.iter().collect();
    }
    self
      .products
      .iter()
      .filter(|product| {
        product.name.to_lowercase().contains(&needle)
          || product
            .description
            .as_deref()
            .map_or(false, |d| d.to_lowercase().contains(&needle))
      })
      .collect()
  }

  /// Products ordered by ascending price; ties keep listing order.
  pub fn sorted_by_price(&self) -> Vec<&Product> {
    let mut sorted: Vec<&Product> = self.products.iter().collect();
    sorted.sort_by_key(|product| product.price);
    sorted
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::model::Price;

  fn sample() -> Catalog {
    Catalog::new(vec![
      Product::new(1, "Wireless Headphones", Price::from_cents(9999).unwrap(), "img/1.jpg").with_description("Noise cancelling"),
      Product::new(2, "Smart Watch", Price::from_cents(19999).unwrap(), "img/2.jpg"),
      Product::new(3, "Phone Case", Price::from_cents(1999).unwrap(), "img/3.jpg").with_description("Fits most phones"),
    ])
    .unwrap()
  }

  #[test]
  fn search_matches_name_and_description_case_insensitively() {
    let catalog = sample();
    let ids = |hits: Vec<&Product>| hits.iter().map(|p| p.id.0).collect::<Vec<_>>();
    assert_eq!(ids(catalog.search("PHONE")), vec![1, 3]);
    assert_eq!(ids(catalog.search("watch")), vec![2]);
    assert_eq!(catalog.search("  ").len(), 3);
    assert!(catalog.search("toaster").is_empty());
  }

  #[test]
  fn sorts_by_price() {
    let catalog = sample();
    let ids: Vec<u64> = catalog.sorted_by_price().iter().map(|p| p.id.0).collect();
    assert_eq!(ids, vec![3, 1, 2]);
  }

  #[test]
  fn rejects_duplicate_ids() {
    let result = Catalog::new(vec![
      Product::new(1, "A", Price::from_cents(1).unwrap(), ""),
      Product::new(1, "B", Price::from_cents(2).unwrap(), ""),
    ]);
    assert!(matches!(result, Err(CartError::InvalidProduct { .. })));
  }

  #[test]
  fn parses_listing_json() {
    let catalog = Catalog::from_json(r#"[{"id": 10, "name": "Mug", "price": 8.5, "image": "mug.png"}]"#).unwrap();
    assert_eq!(catalog.get(ProductId(10)).map(|p| p.price), Some(Price::from_cents(850).unwrap()));
    assert!(catalog.get(ProductId(11)).is_none());
  }
}
