//! Core domain event trait.

use common::{AggregateId, Dispatchable};

/// Trait for domain events.
///
/// Domain events are immutable facts, named in past tense, and always tied to
/// the aggregate that recorded them. The routing name comes from
/// [`Dispatchable`], which lets events travel over an event bus.
pub trait DomainEvent: Dispatchable + Clone {
    /// Returns the id of the aggregate that recorded this event.
    fn aggregate_id(&self) -> AggregateId;
}
