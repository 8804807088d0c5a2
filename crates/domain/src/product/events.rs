//! Product domain events.

use chrono::{DateTime, Utc};
use common::{AggregateId, Dispatchable};
use serde::{Deserialize, Serialize};

use crate::event::DomainEvent;

/// Routing name of [`ProductEvent::ProductPurchased`].
pub const PRODUCT_PURCHASED: &str = "product.purchased";

/// Events that can occur on a product aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ProductEvent {
    /// The product was purchased and is no longer available.
    ProductPurchased(ProductPurchasedData),
}

impl ProductEvent {
    /// Every event name a product can emit. Event buses must subscribe to all of them.
    pub const NAMES: &'static [&'static str] = &[PRODUCT_PURCHASED];

    /// Creates a ProductPurchased event.
    pub fn product_purchased(product_id: AggregateId) -> Self {
        ProductEvent::ProductPurchased(ProductPurchasedData {
            product_id,
            purchased_at: Utc::now(),
        })
    }
}

impl Dispatchable for ProductEvent {
    fn name(&self) -> &'static str {
        match self {
            ProductEvent::ProductPurchased(_) => PRODUCT_PURCHASED,
        }
    }
}

impl DomainEvent for ProductEvent {
    fn aggregate_id(&self) -> AggregateId {
        match self {
            ProductEvent::ProductPurchased(data) => data.product_id,
        }
    }
}

/// Data for ProductPurchased event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPurchasedData {
    /// The product that was purchased.
    pub product_id: AggregateId,

    /// When the purchase happened.
    pub purchased_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purchased_event_name_and_aggregate() {
        let id = AggregateId::new();
        let event = ProductEvent::product_purchased(id);
        assert_eq!(event.name(), "product.purchased");
        assert_eq!(event.aggregate_id(), id);
    }

    #[test]
    fn names_cover_every_variant() {
        let event = ProductEvent::product_purchased(AggregateId::new());
        assert!(ProductEvent::NAMES.contains(&event.name()));
    }

    #[test]
    fn serialization_is_tagged() {
        let event = ProductEvent::product_purchased(AggregateId::new());
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "ProductPurchased");
        assert!(json["data"]["purchased_at"].is_string());

        let back: ProductEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
