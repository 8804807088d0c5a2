use async_trait::async_trait;
use domain::{Price, Product};
use rust_decimal::Decimal;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{AggregateId, Result, StoreError, repository::ProductRepository};

/// PostgreSQL-backed product repository.
#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    /// Creates a new PostgreSQL product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Inserts a product, or overwrites the stored one with the same id.
    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    pub async fn upsert(&self, product: &Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, available, price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name, available = EXCLUDED.available, price = EXCLUDED.price
            "#,
        )
        .bind(product.id().as_uuid())
        .bind(product.name())
        .bind(product.is_available())
        .bind(product.price().amount())
        .execute(&self.pool)
        .await
        .map_err(StoreError::database("upsert product"))?;
        Ok(())
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        let id = AggregateId::from_uuid(
            row.try_get::<Uuid, _>("id")
                .map_err(StoreError::database("read product id"))?,
        );
        let name: String = row
            .try_get("name")
            .map_err(StoreError::database("read product name"))?;
        let available: bool = row
            .try_get("available")
            .map_err(StoreError::database("read product availability"))?;
        let price: Option<Decimal> = row
            .try_get("price")
            .map_err(StoreError::database("read product price"))?;

        // A missing price reads as zero.
        let price = Price::new(price.unwrap_or(Decimal::ZERO))
            .map_err(|source| StoreError::InvalidRow { id, source })?;

        Ok(Product::hydrate(id, name, available, price))
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[tracing::instrument(skip(self))]
    async fn find_by_id(&self, id: AggregateId) -> Result<Product> {
        let row = sqlx::query("SELECT id, name, available, price FROM products WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::database("find product"))?
            .ok_or(StoreError::NotFound(id))?;

        Self::row_to_product(row)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query("SELECT id, name, available, price FROM products")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::database("find products"))?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    #[tracing::instrument(skip(self, product), fields(product_id = %product.id()))]
    async fn update_available(&self, product: &Product) -> Result<()> {
        let id = product.id();
        let result = sqlx::query(
            "UPDATE products SET available = $1 WHERE id = $2 AND available IS DISTINCT FROM $1",
        )
        .bind(product.is_available())
        .bind(id.as_uuid())
        .execute(&self.pool)
        .await
        .map_err(StoreError::database("update product"))?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM products WHERE id = $1)")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await
            .map_err(StoreError::database("update product: check existence"))?;

        if exists {
            tracing::warn!(%id, "availability already written by a concurrent update");
            Err(StoreError::Conflict(id))
        } else {
            Err(StoreError::NotFound(id))
        }
    }
}
