//! One handler per use case.
//!
//! Handlers are bound by name, so each one first checks that it received the
//! request kind it serves and rejects anything else.

mod products;
mod purchase;

pub use products::{ProductHandler, ProductsHandler};
pub use purchase::PurchaseProductHandler;
