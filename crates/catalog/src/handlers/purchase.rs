use async_trait::async_trait;
use bus::{Context, Handler};
use common::Dispatchable;
use domain::ProductEvent;
use store::ProductRepository;

use crate::error::AppError;
use crate::request::{Command, PURCHASE_PRODUCT, Request};

/// Handles [`Command::PurchaseProduct`].
///
/// Loads the product, purchases it and writes the new availability. The
/// recorded events are returned for the event middleware to publish.
pub struct PurchaseProductHandler<R> {
    repository: R,
}

impl<R> PurchaseProductHandler<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: ProductRepository> Handler<Request> for PurchaseProductHandler<R> {
    type Output = Vec<ProductEvent>;
    type Error = AppError;

    #[tracing::instrument(skip_all, fields(request_id = %ctx.request_id()))]
    async fn handle(&self, ctx: &Context, request: Request) -> Result<Vec<ProductEvent>, AppError> {
        let cmd = match request {
            Request::Command(Command::PurchaseProduct(cmd)) => cmd,
            other => {
                return Err(AppError::InvalidCommand {
                    expected: PURCHASE_PRODUCT,
                    had: other.name(),
                });
            }
        };

        let mut product = self.repository.find_by_id(cmd.id).await?;
        let events = product.purchase()?;
        self.repository.update_available(&product).await?;

        metrics::counter!("products_purchased_total").increment(1);
        tracing::info!(product_id = %cmd.id, events = events.len(), "product purchased");
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{PurchaseProduct, Query};
    use domain::fixtures::ProductFixture;
    use store::InMemoryProductRepository;

    #[tokio::test]
    async fn purchase_persists_the_new_availability() {
        let product = ProductFixture::new().available(true).build();
        let repo = InMemoryProductRepository::with_products([product.clone()]);
        let handler = PurchaseProductHandler::new(repo.clone());

        let request: Request = Command::PurchaseProduct(PurchaseProduct { id: product.id() }).into();
        let events = handler.handle(&Context::new(), request).await.unwrap();

        assert_eq!(events.len(), 1);
        assert!(!repo.find_by_id(product.id()).await.unwrap().is_available());
    }

    #[tokio::test]
    async fn queries_are_rejected() {
        let handler = PurchaseProductHandler::new(InMemoryProductRepository::new());

        let err = handler
            .handle(&Context::new(), Request::from(Query::Products))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::InvalidCommand {
                expected: "purchase.product",
                had: "products"
            }
        ));
    }
}
