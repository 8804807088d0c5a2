use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::Product;
use tokio::sync::RwLock;

use crate::{AggregateId, Result, StoreError, repository::ProductRepository};

/// In-memory product repository.
///
/// Stores products in a map and honours the same contract as the
/// PostgreSQL implementation, including the conditional availability write.
#[derive(Clone, Default)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<AggregateId, Product>>>,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding `products`.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id(), p)).collect();
        Self {
            products: Arc::new(RwLock::new(products)),
        }
    }

    /// Stores `product`, replacing any product with the same id.
    pub async fn insert(&self, product: Product) {
        self.products.write().await.insert(product.id(), product);
    }

    /// Returns the number of stored products.
    pub async fn len(&self) -> usize {
        self.products.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.products.read().await.is_empty()
    }

    /// Removes every product.
    pub async fn clear(&self) {
        self.products.write().await.clear();
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: AggregateId) -> Result<Product> {
        self.products
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.products.read().await.values().cloned().collect())
    }

    async fn update_available(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        let stored = products
            .get_mut(&product.id())
            .ok_or(StoreError::NotFound(product.id()))?;

        if stored.is_available() == product.is_available() {
            return Err(StoreError::Conflict(product.id()));
        }

        *stored = Product::hydrate(
            stored.id(),
            stored.name(),
            product.is_available(),
            stored.price(),
        );
        Ok(())
    }
}
