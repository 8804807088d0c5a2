//! Bus construction.
//!
//! Both buses are built once at startup and shared read-only afterwards.
//! Every command goes through `LogErrors ► PublishEvents ► handler`, every
//! query through `LogErrors ► handler`.

use std::sync::Arc;

use bus::{
    Bus, BusError, Context, EventBus, MapOutput, command_middleware, handler_fn,
    query_middleware,
};
use common::{AggregateId, Dispatchable};
use domain::{DomainEvent, PRODUCT_PURCHASED, ProductEvent};
use store::ProductRepository;

use crate::error::AppError;
use crate::handlers::{ProductHandler, ProductsHandler, PurchaseProductHandler};
use crate::request::{Command, PRODUCT, PRODUCTS, PURCHASE_PRODUCT, Query, Request};
use crate::response::{ProductView, QueryResult, Response};

async fn log_event(ctx: Context, event: ProductEvent) -> Result<(), BusError> {
    tracing::info!(
        name = event.name(),
        aggregate_id = %event.aggregate_id(),
        request_id = %ctx.request_id(),
        "received event"
    );
    Ok(())
}

/// Checks that every event a product can emit has a subscriber.
pub fn ensure_subscribed(events: &EventBus<ProductEvent>) -> Result<(), BusError> {
    events.ensure_registered(ProductEvent::NAMES)
}

/// Builds the events bus with a logging subscriber for every product event.
pub fn build_events_bus() -> Result<EventBus<ProductEvent>, BusError> {
    let mut events = EventBus::new();
    events.register(PRODUCT_PURCHASED, handler_fn(log_event))?;
    ensure_subscribed(&events)?;
    Ok(events)
}

/// Builds the command/query bus.
///
/// Every handler shares `repository`; command handlers publish through
/// `events`.
pub fn build_command_query_bus<R>(
    repository: R,
    events: Arc<EventBus<ProductEvent>>,
) -> Result<Bus<Request, Response, AppError>, BusError>
where
    R: ProductRepository + Clone + 'static,
{
    let mut bus = Bus::new();

    bus.register(
        PURCHASE_PRODUCT,
        MapOutput::new(
            command_middleware(PurchaseProductHandler::new(repository.clone()), events),
            Response::Events,
        ),
    )?;
    bus.register(
        PRODUCTS,
        MapOutput::new(
            query_middleware(ProductsHandler::new(repository.clone())),
            |views: Vec<ProductView>| Response::Query(QueryResult::Products(views)),
        ),
    )?;
    bus.register(
        PRODUCT,
        MapOutput::new(
            query_middleware(ProductHandler::new(repository)),
            |view: ProductView| Response::Query(QueryResult::Product(view)),
        ),
    )?;

    bus.ensure_registered(Command::NAMES)?;
    bus.ensure_registered(Query::NAMES)?;
    Ok(bus)
}

/// The catalog's dispatch entrypoint.
#[derive(Debug)]
pub struct CatalogBus {
    bus: Bus<Request, Response, AppError>,
    events: Arc<EventBus<ProductEvent>>,
}

impl CatalogBus {
    /// Wires both buses around `repository` with the default event subscribers.
    pub fn new<R>(repository: R) -> Result<Self, BusError>
    where
        R: ProductRepository + Clone + 'static,
    {
        Self::with_events(repository, Arc::new(build_events_bus()?))
    }

    /// Wires the command/query bus around `repository`, publishing to `events`.
    pub fn with_events<R>(repository: R, events: Arc<EventBus<ProductEvent>>) -> Result<Self, BusError>
    where
        R: ProductRepository + Clone + 'static,
    {
        ensure_subscribed(&events)?;
        let bus = build_command_query_bus(repository, events.clone())?;
        Ok(Self { bus, events })
    }

    /// Routes `request` to its handler.
    pub async fn dispatch(&self, ctx: &Context, request: Request) -> Result<Response, AppError> {
        self.bus.dispatch(ctx, request).await
    }

    /// Runs a command and returns the events it recorded.
    pub async fn execute(&self, ctx: &Context, command: Command) -> Result<Vec<ProductEvent>, AppError> {
        let name = command.name();
        match self.dispatch(ctx, command.into()).await? {
            Response::Events(events) => Ok(events),
            other => Err(AppError::UnexpectedResponse {
                name,
                response: other.kind(),
            }),
        }
    }

    /// Runs a query.
    pub async fn ask(&self, ctx: &Context, query: Query) -> Result<QueryResult, AppError> {
        let name = query.name();
        match self.dispatch(ctx, query.into()).await? {
            Response::Query(result) => Ok(result),
            other => Err(AppError::UnexpectedResponse {
                name,
                response: other.kind(),
            }),
        }
    }

    /// Lists every product.
    pub async fn products(&self, ctx: &Context) -> Result<Vec<ProductView>, AppError> {
        match self.ask(ctx, Query::Products).await? {
            QueryResult::Products(views) => Ok(views),
            other => Err(AppError::UnexpectedResponse {
                name: PRODUCTS,
                response: other.kind(),
            }),
        }
    }

    /// Loads a single product.
    pub async fn product(&self, ctx: &Context, id: AggregateId) -> Result<ProductView, AppError> {
        match self.ask(ctx, Query::Product { id }).await? {
            QueryResult::Product(view) => Ok(view),
            other => Err(AppError::UnexpectedResponse {
                name: PRODUCT,
                response: other.kind(),
            }),
        }
    }

    /// Names routed by the command/query bus, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        self.bus.names()
    }

    pub fn events(&self) -> &Arc<EventBus<ProductEvent>> {
        &self.events
    }
}
