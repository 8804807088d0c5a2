//! Domain layer for the product catalog.
//!
//! This crate provides:
//! - The [`DomainEvent`] trait shared by every event an aggregate emits
//! - The [`Product`] aggregate with its one-way availability state machine
//! - [`ProductEvent`], the facts a product records when it changes

pub mod event;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
pub mod product;

pub use common::AggregateId;
pub use event::DomainEvent;
pub use product::{
    PRODUCT_PURCHASED, Price, Product, ProductError, ProductEvent, ProductPurchasedData,
    ProductState,
};
