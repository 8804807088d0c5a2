//! Value objects for the product domain.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ProductError;

/// Non-negative product price.
///
/// Backed by a `Decimal` so that amounts like `1.10` survive storage and
/// arithmetic exactly. Serialized as a JSON number, never as a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Creates a price, rejecting negative amounts.
    pub fn new(amount: Decimal) -> Result<Self, ProductError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ProductError::NegativePrice(amount));
        }
        Ok(Self(amount))
    }

    /// Creates a price from an amount in cents.
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from(cents) / Decimal::ONE_HUNDRED)
    }

    /// Returns a zero price.
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Returns the amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns true if the price is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = ProductError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Price::new(amount).map_err(serde::de::Error::custom)
    }
}
