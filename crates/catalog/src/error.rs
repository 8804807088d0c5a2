//! Catalog error type.

use bus::BusError;
use domain::ProductError;
use store::StoreError;
use thiserror::Error;

/// Errors returned by catalog handlers and the command/query bus.
#[derive(Debug, Error)]
pub enum AppError {
    /// A command handler received a request of another kind.
    #[error("invalid command: expected '{expected}', had '{had}'")]
    InvalidCommand {
        expected: &'static str,
        had: &'static str,
    },

    /// A query handler received a request of another kind.
    #[error("invalid query: expected '{expected}', had '{had}'")]
    InvalidQuery {
        expected: &'static str,
        had: &'static str,
    },

    /// The bus returned a response of the wrong shape for the request.
    #[error("unexpected {response} response to '{name}'")]
    UnexpectedResponse {
        name: &'static str,
        response: &'static str,
    },

    #[error(transparent)]
    Bus(#[from] BusError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Product(#[from] ProductError),
}

impl AppError {
    /// Returns true if the requested product does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::Store(StoreError::NotFound(_)))
    }

    /// Returns true if the product can no longer be purchased, either because
    /// it already was or because a concurrent purchase won.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            AppError::Product(ProductError::AlreadyPurchased(_))
                | AppError::Store(StoreError::Conflict(_))
        )
    }
}
