use async_trait::async_trait;
use bus::{Context, Handler};
use common::Dispatchable;
use store::ProductRepository;

use crate::error::AppError;
use crate::request::{PRODUCT, PRODUCTS, Query, Request};
use crate::response::ProductView;

/// Handles [`Query::Products`]: every product, in repository order.
pub struct ProductsHandler<R> {
    repository: R,
}

impl<R> ProductsHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> Handler<Request> for ProductsHandler<R> {
    type Output = Vec<ProductView>;
    type Error = AppError;

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id()))]
    async fn handle(&self, ctx: &Context, request: Request) -> Result<Vec<ProductView>, AppError> {
        if !matches!(request, Request::Query(Query::Products)) {
            return Err(AppError::InvalidQuery {
                expected: PRODUCTS,
                had: request.name(),
            });
        }

        let products = self.repository.find_all().await?;
        Ok(products.iter().map(ProductView::from).collect())
    }
}

/// Handles [`Query::Product`]: a single product by id.
pub struct ProductHandler<R> {
    repository: R,
}

impl<R> ProductHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> Handler<Request> for ProductHandler<R> {
    type Output = ProductView;
    type Error = AppError;

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id()))]
    async fn handle(&self, ctx: &Context, request: Request) -> Result<ProductView, AppError> {
        let id = match request {
            Request::Query(Query::Product { id }) => id,
            other => {
                return Err(AppError::InvalidQuery {
                    expected: PRODUCT,
                    had: other.name(),
                });
            }
        };

        let product = self.repository.find_by_id(id).await?;
        Ok(ProductView::from(product))
    }
}
