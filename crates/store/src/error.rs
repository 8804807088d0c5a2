use domain::ProductError;
use thiserror::Error;

use crate::AggregateId;

/// Errors that can occur when interacting with the product repository.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product is stored under this id.
    #[error("not found: product {0}")]
    NotFound(AggregateId),

    /// The stored availability no longer matches what the write expected.
    #[error("product {0} was modified concurrently")]
    Conflict(AggregateId),

    /// A database call failed.
    #[error("{operation}: {source}")]
    Database {
        operation: &'static str,
        source: sqlx::Error,
    },

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row does not form a valid product.
    #[error("invalid stored product {id}: {source}")]
    InvalidRow {
        id: AggregateId,
        source: ProductError,
    },
}

impl StoreError {
    /// Returns a closure wrapping a `sqlx::Error` with the failing operation.
    pub(crate) fn database(operation: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| StoreError::Database { operation, source }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StoreError>;
