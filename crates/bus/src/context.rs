//! Per-dispatch context.

use uuid::Uuid;

/// Context handed down through a dispatch chain.
///
/// It carries a request id that every span and log line of the dispatch is
/// tagged with. Cancellation is not modelled here: dropping the dispatch
/// future cancels everything beneath it, repository calls included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    request_id: Uuid,
}

impl Context {
    /// Creates a context with a fresh request id.
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
        }
    }

    /// Creates a context for a request id assigned upstream.
    pub fn with_request_id(request_id: Uuid) -> Self {
        Self { request_id }
    }

    /// Returns the request id.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
