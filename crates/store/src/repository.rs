use std::sync::Arc;

use async_trait::async_trait;
use domain::Product;

use crate::{AggregateId, Result};

/// Persistence contract for product aggregates.
///
/// Implementations must be thread-safe (Send + Sync); the catalog shares one
/// instance across every request.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Loads a product by id.
    ///
    /// Fails with `StoreError::NotFound` if no such product exists.
    async fn find_by_id(&self, id: AggregateId) -> Result<Product>;

    /// Loads every product. No particular order is guaranteed.
    async fn find_all(&self) -> Result<Vec<Product>>;

    /// Persists the availability flag of `product`.
    ///
    /// The write only lands if the stored flag differs from the new one, so
    /// it records a transition rather than overwriting blindly. When no row
    /// is affected the call fails: `StoreError::NotFound` if the product is
    /// gone, `StoreError::Conflict` if it already holds the new value.
    async fn update_available(&self, product: &Product) -> Result<()>;
}

#[async_trait]
impl<R: ProductRepository + ?Sized> ProductRepository for Arc<R> {
    async fn find_by_id(&self, id: AggregateId) -> Result<Product> {
        (**self).find_by_id(id).await
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        (**self).find_all().await
    }

    async fn update_available(&self, product: &Product) -> Result<()> {
        (**self).update_available(product).await
    }
}
