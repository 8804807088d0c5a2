//! Product catalog use cases.
//!
//! This crate provides:
//! - The requests a caller can make: [`Command`] and [`Query`], wrapped in [`Request`]
//! - One handler per use case, each holding only a [`ProductRepository`](store::ProductRepository)
//! - [`CatalogBus`], the command/query bus wired with the standard middleware and
//!   an events bus that every [`ProductEvent`](domain::ProductEvent) reaches

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod wiring;

pub use error::AppError;
pub use handlers::{ProductHandler, ProductsHandler, PurchaseProductHandler};
pub use request::{
    Command, PRODUCT, PRODUCTS, PURCHASE_PRODUCT, PurchaseProduct, Query, Request,
};
pub use response::{ProductView, QueryResult, Response};
pub use wiring::{CatalogBus, build_command_query_bus, build_events_bus, ensure_subscribed};
