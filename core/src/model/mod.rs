// cartkit/src/model/mod.rs

//! Value types shared by the cart, the catalog and the persisted record.

pub mod line_item;
pub mod price;
pub mod product;

pub use line_item::LineItem;
pub use price::Price;
pub use product::{Product, ProductId};
