//! Bus error types.

use thiserror::Error;

/// Errors raised by a bus itself rather than by the handlers it routes to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    /// No handler is bound to the dispatched name.
    #[error("unregistered dispatchable '{0}'")]
    Unregistered(String),

    /// A handler is already bound to this name.
    #[error("a handler is already registered for '{0}'")]
    AlreadyRegistered(String),

    /// Handlers cannot be bound to an empty name.
    #[error("dispatch names must not be empty")]
    EmptyName,

    /// An event subscriber failed.
    #[error("handler for '{name}' failed: {reason}")]
    Handler { name: String, reason: String },
}

impl BusError {
    /// Builds a [`BusError::Handler`] for a failing subscriber.
    pub fn handler(name: impl Into<String>, reason: impl Into<String>) -> Self {
        BusError::Handler {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
