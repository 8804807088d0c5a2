//! In-process dispatch core.
//!
//! This crate provides:
//! - [`Bus`], a name-keyed registry that routes a [`Dispatchable`] to exactly one handler
//! - [`Handler`], the async contract every command, query and event handler implements
//! - Middleware that wraps handlers: [`LogErrors`], [`PublishEvents`] and [`MapOutput`]
//!
//! Two independent buses are expected at runtime: one for commands and queries,
//! and an [`EventBus`] for fire-and-forget domain events.

pub mod bus;
pub mod context;
pub mod error;
pub mod handler;
pub mod middleware;

pub use bus::{Bus, EventBus};
pub use common::Dispatchable;
pub use context::Context;
pub use error::BusError;
pub use handler::{FnHandler, Handler, handler_fn};
pub use middleware::{
    LogErrors, MapOutput, PublishEvents, command_middleware, query_middleware,
};
