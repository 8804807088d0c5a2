//! Naming contract shared by everything that travels over a bus.

/// A value that can be routed by a bus.
///
/// The name is the only routing key: buses never inspect the payload.
/// Every concrete kind carries a fixed, non-empty name.
pub trait Dispatchable: Send + Sync + 'static {
    /// Returns the routing name of this value.
    fn name(&self) -> &'static str;
}
