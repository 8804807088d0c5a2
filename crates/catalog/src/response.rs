//! What the command/query bus hands back.

use common::AggregateId;
use domain::{Price, Product, ProductEvent};
use serde::{Deserialize, Serialize};

/// Flat, read-only projection of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductView {
    pub id: AggregateId,
    pub name: String,
    pub available: bool,
    pub price: Price,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id(),
            name: product.name().to_string(),
            available: product.is_available(),
            price: product.price(),
        }
    }
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

/// Result of a query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResult {
    Products(Vec<ProductView>),
    Product(ProductView),
}

impl QueryResult {
    /// Short label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryResult::Products(_) => "products",
            QueryResult::Product(_) => "product",
        }
    }
}

/// Result of any request routed by the command/query bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Events recorded by a successful command, in order.
    Events(Vec<ProductEvent>),
    Query(QueryResult),
}

impl Response {
    /// Short label used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Response::Events(_) => "events",
            Response::Query(result) => result.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::fixtures::ProductFixture;

    #[test]
    fn view_copies_fields_verbatim() {
        let product = ProductFixture::new()
            .name("lamp")
            .available(true)
            .price(Price::from_cents(1999))
            .build();

        let view = ProductView::from(&product);

        assert_eq!(view.id, product.id());
        assert_eq!(view.name, "lamp");
        assert!(view.available);
        assert_eq!(view.price, Price::from_cents(1999));
    }

    #[test]
    fn view_serializes_flat() {
        let product = ProductFixture::new().name("product1").build();
        let json = serde_json::to_value(ProductView::from(product.clone())).unwrap();

        assert_eq!(json["id"], product.id().to_string());
        assert_eq!(json["name"], "product1");
        assert_eq!(json["available"], false);
        assert_eq!(json["price"], 1.1);
    }

    #[test]
    fn view_price_is_a_json_number() {
        let product = ProductFixture::new().price(Price::from_cents(110)).build();
        let json = serde_json::to_value(ProductView::from(product)).unwrap();

        assert!(json["price"].is_number(), "price serialized as {}", json["price"]);
        assert_eq!(json["price"], 1.1);
    }

    #[test]
    fn query_results_serialize_without_a_tag() {
        let view = ProductView::from(ProductFixture::new().build());
        let list = serde_json::to_value(QueryResult::Products(vec![view.clone()])).unwrap();
        assert!(list.is_array());

        let single = serde_json::to_value(QueryResult::Product(view)).unwrap();
        assert!(single.is_object());
    }
}
