//! Shared types for the product catalog workspace.

pub mod dispatch;
pub mod types;

pub use dispatch::Dispatchable;
pub use types::{AggregateId, ParseIdError};
