//! Persistence boundary for product aggregates.
//!
//! [`ProductRepository`] is the contract the catalog handlers consume.
//! Two implementations are provided: [`InMemoryProductRepository`] for tests
//! and local runs, and [`PostgresProductRepository`] backed by `sqlx`.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use common::AggregateId;
pub use error::{Result, StoreError};
pub use memory::InMemoryProductRepository;
pub use postgres::PostgresProductRepository;
pub use repository::ProductRepository;
