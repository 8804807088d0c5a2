//! Product aggregate implementation.

use common::AggregateId;
use serde::{Deserialize, Serialize};

use super::{Price, ProductError, ProductEvent, ProductState};

/// Product aggregate root.
///
/// A purchasable catalog entry. Availability only ever moves from
/// available to unavailable. Operations that change state return the events
/// they recorded; nothing is buffered on the aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    id: AggregateId,
    name: String,
    price: Price,
    state: ProductState,
}

impl Product {
    /// Creates a fresh, available product.
    pub fn new(id: AggregateId, name: impl Into<String>, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            state: ProductState::Available,
        }
    }

    /// Rebuilds a product from stored fields.
    ///
    /// Rehydration is not a business transition and records no events.
    pub fn hydrate(id: AggregateId, name: impl Into<String>, available: bool, price: Price) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            state: ProductState::from_available(available),
        }
    }
}

// Query methods
impl Product {
    pub fn id(&self) -> AggregateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn state(&self) -> ProductState {
        self.state
    }

    /// Returns true if the product can still be purchased.
    pub fn is_available(&self) -> bool {
        self.state.is_available()
    }

    /// Returns true once the product has been purchased.
    pub fn is_purchased(&self) -> bool {
        !self.is_available()
    }
}

// Command methods (return events)
impl Product {
    /// Purchases the product.
    ///
    /// Fails with [`ProductError::AlreadyPurchased`] when the product is no
    /// longer available, in which case the product is left untouched.
    pub fn purchase(&mut self) -> Result<Vec<ProductEvent>, ProductError> {
        if !self.state.can_purchase() {
            return Err(ProductError::AlreadyPurchased(self.id));
        }

        let events = vec![ProductEvent::product_purchased(self.id)];
        for event in &events {
            self.apply(event);
        }
        Ok(events)
    }

    fn apply(&mut self, event: &ProductEvent) {
        match event {
            ProductEvent::ProductPurchased(_) => {
                self.state = ProductState::Unavailable;
            }
        }
    }
}
