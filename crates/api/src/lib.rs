//! HTTP API server with observability for the product catalog.
//!
//! Provides REST endpoints for listing and purchasing products,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use bus::BusError;
use catalog::CatalogBus;
use common::AggregateId;
use domain::{Price, Product};
use metrics_exporter_prometheus::PrometheusHandle;
use rust_decimal::Decimal;
use store::{InMemoryProductRepository, ProductRepository};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state accessible from all handlers.
#[derive(Debug)]
pub struct AppState {
    pub catalog: CatalogBus,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/products", get(routes::products::list))
        .route("/products/{id}", get(routes::products::get))
        .route("/products/{id}/purchase", post(routes::products::purchase))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the catalog buses around `repository`.
pub fn create_state<R>(repository: R) -> Result<Arc<AppState>, BusError>
where
    R: ProductRepository + Clone + 'static,
{
    Ok(Arc::new(AppState {
        catalog: CatalogBus::new(repository)?,
    }))
}

/// Products the in-memory catalog starts with.
pub fn demo_products() -> Vec<Product> {
    [
        ("product1", Decimal::new(110, 2)),
        ("product2", Decimal::new(2250, 2)),
        ("product3", Decimal::new(999, 2)),
    ]
    .into_iter()
    .map(|(name, amount)| {
        Product::new(
            AggregateId::new(),
            name,
            Price::new(amount).unwrap_or_default(),
        )
    })
    .collect()
}

/// Creates application state backed by an in-memory repository seeded with
/// [`demo_products`].
pub fn create_default_state() -> Result<Arc<AppState>, BusError> {
    create_state(InMemoryProductRepository::with_products(demo_products()))
}
