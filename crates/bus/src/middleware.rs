//! Handler middleware.
//!
//! Middleware are handlers that wrap another handler. The command chain is
//! fixed, outermost first:
//!
//! ```text
//! LogErrors ──► PublishEvents ──► command handler
//! ```
//!
//! so an error raised by the handler or by event publication is logged
//! exactly once, and events only reach the event bus after the handler
//! succeeded. Queries only get [`LogErrors`].

use std::fmt::Display;
use std::sync::Arc;

use async_trait::async_trait;
use common::Dispatchable;

use crate::bus::EventBus;
use crate::context::Context;
use crate::error::BusError;
use crate::handler::Handler;

/// Logs every error returned by the wrapped handler, then returns it as is.
pub struct LogErrors<H> {
    inner: H,
}

impl<H> LogErrors<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D, H> Handler<D> for LogErrors<H>
where
    D: Dispatchable,
    H: Handler<D>,
    H::Error: Display,
{
    type Output = H::Output;
    type Error = H::Error;

    async fn handle(&self, ctx: &Context, request: D) -> Result<Self::Output, Self::Error> {
        let name = request.name();
        self.inner.handle(ctx, request).await.inspect_err(|err| {
            tracing::error!(
                name,
                request_id = %ctx.request_id(),
                error = %err,
                "dispatch failed"
            );
        })
    }
}

/// Publishes the events returned by the wrapped handler, in order, through
/// an [`EventBus`].
///
/// Nothing is published when the handler fails. A publication failure stops
/// at the failing event and is returned as the handler's error.
pub struct PublishEvents<H, Ev> {
    inner: H,
    events: Arc<EventBus<Ev>>,
}

impl<H, Ev> PublishEvents<H, Ev> {
    pub fn new(inner: H, events: Arc<EventBus<Ev>>) -> Self {
        Self { inner, events }
    }
}

#[async_trait]
impl<D, H, Ev> Handler<D> for PublishEvents<H, Ev>
where
    D: Dispatchable,
    Ev: Dispatchable + Clone,
    H: Handler<D, Output = Vec<Ev>>,
    H::Error: From<BusError>,
{
    type Output = Vec<Ev>;
    type Error = H::Error;

    async fn handle(&self, ctx: &Context, request: D) -> Result<Vec<Ev>, H::Error> {
        let events = self.inner.handle(ctx, request).await?;

        for event in &events {
            self.events.dispatch(ctx, event.clone()).await?;
            metrics::counter!("events_published_total", "name" => event.name()).increment(1);
        }

        Ok(events)
    }
}

/// Converts the wrapped handler's output, e.g. into a bus-wide response enum.
pub struct MapOutput<H, F> {
    inner: H,
    f: F,
}

impl<H, F> MapOutput<H, F> {
    pub fn new(inner: H, f: F) -> Self {
        Self { inner, f }
    }
}

#[async_trait]
impl<D, H, F, O> Handler<D> for MapOutput<H, F>
where
    D: Send + 'static,
    H: Handler<D>,
    F: Fn(H::Output) -> O + Send + Sync,
    O: Send,
{
    type Output = O;
    type Error = H::Error;

    async fn handle(&self, ctx: &Context, request: D) -> Result<O, H::Error> {
        self.inner.handle(ctx, request).await.map(&self.f)
    }
}

/// Wraps a command handler in the standard command chain.
pub fn command_middleware<H, Ev>(
    handler: H,
    events: Arc<EventBus<Ev>>,
) -> LogErrors<PublishEvents<H, Ev>> {
    LogErrors::new(PublishEvents::new(handler, events))
}

/// Wraps a query handler in the standard query chain.
pub fn query_middleware<H>(handler: H) -> LogErrors<H> {
    LogErrors::new(handler)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::Mutex;

    use super::*;
    use crate::handler::handler_fn;

    #[derive(Debug, Clone, PartialEq)]
    enum Tick {
        Started(u32),
        Finished(u32),
    }

    impl Dispatchable for Tick {
        fn name(&self) -> &'static str {
            match self {
                Tick::Started(_) => "tick.started",
                Tick::Finished(_) => "tick.finished",
            }
        }
    }

    struct Run(u32);

    impl Dispatchable for Run {
        fn name(&self) -> &'static str {
            "run"
        }
    }

    #[derive(Debug, PartialEq, thiserror::Error)]
    enum RunError {
        #[error("run refused")]
        Refused,
        #[error(transparent)]
        Bus(#[from] BusError),
    }

    /// Event bus that records what it receives.
    fn recording_bus(seen: Arc<Mutex<Vec<Tick>>>, fail_on: Option<&'static str>) -> EventBus<Tick> {
        let mut bus = EventBus::new();
        for name in ["tick.started", "tick.finished"] {
            let seen = seen.clone();
            bus.register(
                name,
                handler_fn(move |_, tick: Tick| {
                    let seen = seen.clone();
                    async move {
                        if fail_on == Some(tick.name()) {
                            return Err(BusError::handler(tick.name(), "subscriber down"));
                        }
                        seen.lock().unwrap().push(tick);
                        Ok(())
                    }
                }),
            )
            .unwrap();
        }
        bus
    }

    fn run_handler() -> impl Handler<Run, Output = Vec<Tick>, Error = RunError> {
        handler_fn(|_, Run(n): Run| async move {
            if n == 0 {
                return Err(RunError::Refused);
            }
            Ok(vec![Tick::Started(n), Tick::Finished(n)])
        })
    }

    /// Captures formatted log output for the current thread.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn install(&self) -> tracing::subscriber::DefaultGuard {
            let writer = self.clone();
            let subscriber = tracing_subscriber::fmt()
                .with_ansi(false)
                .with_writer(move || writer.clone())
                .finish();
            tracing::subscriber::set_default(subscriber)
        }

        fn count(&self, needle: &str) -> usize {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .matches(needle)
                .count()
        }
    }

    #[tokio::test]
    async fn events_are_published_in_order_after_success() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(recording_bus(seen.clone(), None));
        let chain = command_middleware(run_handler(), events);

        let returned = chain.handle(&Context::new(), Run(7)).await.unwrap();

        assert_eq!(returned, vec![Tick::Started(7), Tick::Finished(7)]);
        assert_eq!(*seen.lock().unwrap(), returned);
    }

    #[tokio::test]
    async fn nothing_is_published_when_handler_fails() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(recording_bus(seen.clone(), None));
        let chain = command_middleware(run_handler(), events);

        let err = chain.handle(&Context::new(), Run(0)).await.unwrap_err();

        assert_eq!(err, RunError::Refused);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn publication_failure_becomes_the_command_error() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(recording_bus(seen.clone(), Some("tick.finished")));
        let chain = command_middleware(run_handler(), events);

        let err = chain.handle(&Context::new(), Run(3)).await.unwrap_err();

        assert_eq!(
            err,
            RunError::Bus(BusError::handler("tick.finished", "subscriber down"))
        );
        assert_eq!(*seen.lock().unwrap(), vec![Tick::Started(3)]);
    }

    #[tokio::test]
    async fn unsubscribed_event_is_rejected() {
        let events = Arc::new(EventBus::<Tick>::new());
        let chain = command_middleware(run_handler(), events);

        let err = chain.handle(&Context::new(), Run(1)).await.unwrap_err();

        assert_eq!(
            err,
            RunError::Bus(BusError::Unregistered("tick.started".to_string()))
        );
    }

    #[tokio::test]
    async fn errors_are_logged_once_and_returned_unchanged() {
        let logs = Captured::default();
        let _guard = logs.install();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(recording_bus(seen, Some("tick.started")));
        let chain = command_middleware(run_handler(), events);

        let refused = chain.handle(&Context::new(), Run(0)).await.unwrap_err();
        assert_eq!(refused, RunError::Refused);
        assert_eq!(logs.count("dispatch failed"), 1);
        assert_eq!(logs.count("run refused"), 1);

        let failed = chain.handle(&Context::new(), Run(2)).await.unwrap_err();
        assert!(matches!(failed, RunError::Bus(BusError::Handler { .. })));
        assert_eq!(logs.count("dispatch failed"), 2);
    }

    #[tokio::test]
    async fn success_is_not_logged_as_failure() {
        let logs = Captured::default();
        let _guard = logs.install();
        let chain = query_middleware(handler_fn(|_, Run(n): Run| async move {
            Ok::<_, RunError>(n + 1)
        }));

        assert_eq!(chain.handle(&Context::new(), Run(1)).await, Ok(2));
        assert_eq!(logs.count("dispatch failed"), 0);
    }

    #[tokio::test]
    async fn query_failures_are_logged_once() {
        let logs = Captured::default();
        let _guard = logs.install();
        let chain = query_middleware(handler_fn(|_, Run(n): Run| async move {
            if n == 0 {
                return Err(RunError::Refused);
            }
            Ok(n)
        }));

        assert_eq!(
            chain.handle(&Context::new(), Run(0)).await,
            Err(RunError::Refused)
        );
        assert_eq!(logs.count("dispatch failed"), 1);
        assert_eq!(logs.count("run refused"), 1);
    }

    #[tokio::test]
    async fn map_output_converts_success_only() {
        let mapped = MapOutput::new(run_handler(), |ticks: Vec<Tick>| ticks.len());

        assert_eq!(mapped.handle(&Context::new(), Run(5)).await, Ok(2));
        assert_eq!(
            mapped.handle(&Context::new(), Run(0)).await,
            Err(RunError::Refused)
        );
    }
}
