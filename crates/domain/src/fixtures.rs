//! Test fixtures for building products in a known state.

use common::AggregateId;
use rust_decimal::Decimal;

use crate::product::{Price, Product};

/// Builder for hydrated products.
///
/// Unset fields fall back to a random id, the name `product1`, an
/// unavailable state and a price of `1.1`.
#[derive(Debug, Clone, Default)]
pub struct ProductFixture {
    id: Option<AggregateId>,
    name: Option<String>,
    available: Option<bool>,
    price: Option<Price>,
}

impl ProductFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: AggregateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    pub fn price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn build(self) -> Product {
        Product::hydrate(
            self.id.unwrap_or_default(),
            self.name.unwrap_or_else(|| "product1".to_string()),
            self.available.unwrap_or(false),
            self.price
                .unwrap_or_else(|| Price::new(Decimal::new(11, 1)).unwrap_or_default()),
        )
    }
}
