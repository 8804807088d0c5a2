//! Product aggregate and related types.

mod aggregate;
mod events;
mod state;
mod value_objects;

pub use aggregate::Product;
pub use events::{PRODUCT_PURCHASED, ProductEvent, ProductPurchasedData};
pub use state::ProductState;
pub use value_objects::Price;

use common::AggregateId;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur during product operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductError {
    /// The product was already purchased.
    #[error("product {0} not available for purchasing")]
    AlreadyPurchased(AggregateId),

    /// Prices cannot be negative.
    #[error("invalid price {0}: must not be negative")]
    NegativePrice(Decimal),
}
