//! The handler contract.

use std::future::Future;

use async_trait::async_trait;

use crate::context::Context;

/// Handles one kind of request routed by a [`Bus`](crate::Bus).
///
/// Handlers receive the whole dispatched value, not a pre-narrowed payload:
/// routing is by name only, so a handler that is bound under the wrong name
/// sees a request of the wrong kind and must reject it.
#[async_trait]
pub trait Handler<D>: Send + Sync
where
    D: Send + 'static,
{
    /// Value returned on success.
    type Output: Send;

    /// Error returned on failure.
    type Error: Send;

    /// Handles a single request.
    async fn handle(&self, ctx: &Context, request: D) -> Result<Self::Output, Self::Error>;
}

/// A [`Handler`] backed by an async closure. Built with [`handler_fn`].
pub struct FnHandler<F> {
    f: F,
}

/// Wraps an async closure into a [`Handler`].
///
/// Handy for event subscribers that carry no state of their own.
pub fn handler_fn<D, F, Fut, O, E>(f: F) -> FnHandler<F>
where
    F: Fn(Context, D) -> Fut,
    Fut: Future<Output = Result<O, E>>,
{
    FnHandler { f }
}

#[async_trait]
impl<D, F, Fut, O, E> Handler<D> for FnHandler<F>
where
    D: Send + 'static,
    F: Fn(Context, D) -> Fut + Send + Sync,
    Fut: Future<Output = Result<O, E>> + Send,
    O: Send,
    E: Send,
{
    type Output = O;
    type Error = E;

    async fn handle(&self, ctx: &Context, request: D) -> Result<O, E> {
        (self.f)(*ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closure_handler_sees_request_and_context() {
        let handler = handler_fn(|ctx: Context, n: u32| async move {
            Ok::<_, String>((ctx.request_id(), n * 2))
        });
        let ctx = Context::new();

        let (request_id, doubled) = handler.handle(&ctx, 21).await.unwrap();

        assert_eq!(request_id, ctx.request_id());
        assert_eq!(doubled, 42);
    }

    #[tokio::test]
    async fn closure_handler_errors_pass_through() {
        let handler = handler_fn(|_: Context, _: u32| async { Err::<(), _>("nope") });
        assert_eq!(handler.handle(&Context::new(), 1).await, Err("nope"));
    }
}
