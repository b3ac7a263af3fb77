// cartkit/src/model/price.rs

//! Fixed-point currency amounts.
//!
//! Prices are held as whole cents so that totals never drift when rendered
//! with two fraction digits. On the wire they stay plain JSON numbers
//! (`10`, `7.5`, `12.99`) to remain compatible with existing cart records.

use crate::error::{CartError, CartResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
  cents: u64,
}

impl Price {
  pub const ZERO: Price = Price { cents: 0 };

  /// Largest representable amount: $9,999,999,999,999.99.
  ///
  /// Up to 15 significant digits survive the trip through a JSON number
  /// (an `f64`) unchanged, so every `Price` reloads exactly as saved.
  pub const MAX: Price = Price {
    cents: 999_999_999_999_999,
  };

  /// Amounts above [`Price::MAX`] are rejected.
  pub fn from_cents(cents: u64) -> CartResult<Self> {
    if cents > Self::MAX.cents {
      return Err(CartError::invalid_product(format!(
        "price of {} cents exceeds the maximum of {}",
        cents,
        Self::MAX
      )));
    }
    Ok(Price { cents })
  }

  /// Builds a price from a decimal currency amount, rounding to the nearest cent.
  ///
  /// Negative, NaN, infinite and above-[`Price::MAX`] amounts are rejected.
  pub fn from_decimal(amount: f64) -> CartResult<Self> {
    if !amount.is_finite() {
      return Err(CartError::invalid_product(format!("price {} is not a finite number", amount)));
    }
    if amount < 0.0 {
      return Err(CartError::invalid_product(format!("price {} is negative", amount)));
    }
    let scaled = (amount * 100.0).round();
    if scaled > Self::MAX.cents as f64 {
      return Err(CartError::invalid_product(format!("price {} is out of range", amount)));
    }
    Ok(Price { cents: scaled as u64 })
  }

  pub const fn cents(self) -> u64 {
    self.cents
  }

  /// Decimal amount, for display layers that want a float. Totals should stay in `Price`.
  pub fn to_decimal(self) -> f64 {
    self.cents as f64 / 100.0
  }

  pub fn is_zero(self) -> bool {
    self.cents == 0
  }

  /// `self × quantity`, saturating at [`Price::MAX`].
  pub fn times(self, quantity: u32) -> Price {
    Price {
      cents: self.cents.saturating_mul(u64::from(quantity)).min(Self::MAX.cents),
    }
  }
}

impl Add for Price {
  type Output = Price;

  fn add(self, rhs: Price) -> Price {
    Price {
      cents: self.cents.saturating_add(rhs.cents).min(Price::MAX.cents),
    }
  }
}

impl Sum for Price {
  fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
    iter.fold(Price::ZERO, Add::add)
  }
}

impl fmt::Display for Price {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
  }
}

impl Serialize for Price {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    if self.cents % 100 == 0 {
      serializer.serialize_u64(self.cents / 100)
    } else {
      serializer.serialize_f64(self.to_decimal())
    }
  }
}

impl<'de> Deserialize<'de> for Price {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let amount = f64::deserialize(deserializer)?;
    Price::from_decimal(amount).map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decimal_amounts_round_to_nearest_cent() {
    assert_eq!(Price::from_decimal(12.99).unwrap().cents(), 1299);
    assert_eq!(Price::from_decimal(7.5).unwrap().cents(), 750);
    assert_eq!(Price::from_decimal(0.005).unwrap().cents(), 1);
    assert_eq!(Price::from_decimal(0.0).unwrap(), Price::ZERO);
  }

  #[test]
  fn rejects_negative_and_non_finite_amounts() {
    assert!(matches!(Price::from_decimal(-0.01), Err(CartError::InvalidProduct { .. })));
    assert!(matches!(Price::from_decimal(f64::NAN), Err(CartError::InvalidProduct { .. })));
    assert!(matches!(Price::from_decimal(f64::INFINITY), Err(CartError::InvalidProduct { .. })));
  }

  #[test]
  fn summing_tenths_does_not_drift() {
    let dime = Price::from_decimal(0.1).unwrap();
    let total: Price = std::iter::repeat(dime).take(3).sum();
    assert_eq!(total, Price::from_decimal(0.3).unwrap());
    assert_eq!(total.to_string(), "$0.30");
  }

  #[test]
  fn display_uses_two_fraction_digits() {
    assert_eq!(Price::from_cents(1250).unwrap().to_string(), "$12.50");
    assert_eq!(Price::from_cents(5).unwrap().to_string(), "$0.05");
    assert_eq!(Price::ZERO.to_string(), "$0.00");
  }

  #[test]
  fn json_form_is_a_plain_number() {
    assert_eq!(serde_json::to_string(&Price::from_cents(1000).unwrap()).unwrap(), "10");
    assert_eq!(serde_json::to_string(&Price::from_cents(750).unwrap()).unwrap(), "7.5");
    let parsed: Price = serde_json::from_str("19.99").unwrap();
    assert_eq!(parsed.cents(), 1999);
    let whole: Price = serde_json::from_str("5").unwrap();
    assert_eq!(whole.cents(), 500);
    assert!(serde_json::from_str::<Price>("-3").is_err());
  }

  #[test]
  fn amounts_above_max_are_rejected() {
    assert_eq!(Price::from_cents(999_999_999_999_999).unwrap(), Price::MAX);
    assert!(matches!(Price::from_cents(1_000_000_000_000_000), Err(CartError::InvalidProduct { .. })));
    assert!(matches!(Price::from_cents(u64::MAX), Err(CartError::InvalidProduct { .. })));
    assert!(matches!(Price::from_decimal(1e13), Err(CartError::InvalidProduct { .. })));
    assert_eq!(Price::from_decimal(9_999_999_999_999.99).unwrap(), Price::MAX);
  }

  #[test]
  fn json_round_trip_is_exact_up_to_max() {
    for cents in [1, 99, 12_345, 900_719_925_474_099, 999_999_999_999_998, 999_999_999_999_999] {
      let price = Price::from_cents(cents).unwrap();
      let json = serde_json::to_string(&price).unwrap();
      assert!(!json.contains('e'), "{} written in exponent form", json);
      let back: Price = serde_json::from_str(&json).unwrap();
      assert_eq!(back, price, "{} cents came back as {}", cents, back.cents());
    }
  }

  #[test]
  fn times_multiplies_by_quantity() {
    assert_eq!(Price::from_cents(250).unwrap().times(4), Price::from_cents(1000).unwrap());
    assert_eq!(Price::MAX.times(2), Price::MAX);
    assert_eq!(Price::MAX + Price::from_cents(1).unwrap(), Price::MAX);
  }
}
