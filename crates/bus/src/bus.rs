//! Name-keyed dispatch registry.

use std::collections::HashMap;

use common::Dispatchable;

use crate::context::Context;
use crate::error::BusError;
use crate::handler::Handler;

type BoxedHandler<D, O, E> = Box<dyn Handler<D, Output = O, Error = E>>;

/// Routes each dispatched value to the single handler bound to its name.
///
/// A bus is filled once at startup and then shared read-only (usually behind
/// an `Arc`). It never inspects payloads: the name returned by
/// [`Dispatchable::name`] is the only routing key.
pub struct Bus<D, O, E> {
    handlers: HashMap<&'static str, BoxedHandler<D, O, E>>,
}

/// Bus for domain events. Subscribers return nothing of interest.
pub type EventBus<Ev> = Bus<Ev, (), BusError>;

impl<D, O, E> Bus<D, O, E>
where
    D: Dispatchable,
    O: Send + 'static,
    E: From<BusError> + Send + 'static,
{
    /// Creates an empty bus.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Binds `handler` to `name`.
    ///
    /// Fails if the name is empty or already bound; callers are expected to
    /// treat either as a startup failure.
    pub fn register<H>(&mut self, name: &'static str, handler: H) -> Result<(), BusError>
    where
        H: Handler<D, Output = O, Error = E> + 'static,
    {
        if name.is_empty() {
            return Err(BusError::EmptyName);
        }
        if self.handlers.contains_key(name) {
            return Err(BusError::AlreadyRegistered(name.to_string()));
        }

        self.handlers.insert(name, Box::new(handler));
        tracing::debug!(name, "handler registered");
        Ok(())
    }

    /// Returns true if a handler is bound to `name`.
    pub fn is_registered(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Returns every bound name, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of bound handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Checks that every name in `names` has a handler.
    ///
    /// Reports the first missing name.
    pub fn ensure_registered(&self, names: &[&'static str]) -> Result<(), BusError> {
        match names.iter().find(|name| !self.is_registered(name)) {
            Some(missing) => Err(BusError::Unregistered((*missing).to_string())),
            None => Ok(()),
        }
    }

    /// Dispatches `dispatchable` to the handler bound to its name.
    ///
    /// The handler's result or error is returned unchanged.
    #[tracing::instrument(
        skip_all,
        fields(name = dispatchable.name(), request_id = %ctx.request_id())
    )]
    pub async fn dispatch(&self, ctx: &Context, dispatchable: D) -> Result<O, E> {
        let name = dispatchable.name();
        let Some(handler) = self.handlers.get(name) else {
            metrics::counter!("bus_dispatch_errors_total", "name" => name).increment(1);
            return Err(BusError::Unregistered(name.to_string()).into());
        };

        metrics::counter!("bus_dispatch_total", "name" => name).increment(1);
        let result = handler.handle(ctx, dispatchable).await;
        if result.is_err() {
            metrics::counter!("bus_dispatch_errors_total", "name" => name).increment(1);
        }
        result
    }
}

impl<D, O, E> Default for Bus<D, O, E>
where
    D: Dispatchable,
    O: Send + 'static,
    E: From<BusError> + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D, O, E> std::fmt::Debug for Bus<D, O, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort_unstable();
        f.debug_struct("Bus").field("handlers", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::handler_fn;

    #[derive(Debug)]
    enum Greeting {
        Hello(String),
        Bye,
    }

    impl Dispatchable for Greeting {
        fn name(&self) -> &'static str {
            match self {
                Greeting::Hello(_) => "hello",
                Greeting::Bye => "bye",
            }
        }
    }

    type GreetingBus = Bus<Greeting, String, BusError>;

    fn hello_bus() -> GreetingBus {
        let mut bus = GreetingBus::new();
        bus.register(
            "hello",
            handler_fn(|_, greeting: Greeting| async move {
                match greeting {
                    Greeting::Hello(who) => Ok(format!("hello, {who}")),
                    other => Err(BusError::handler("hello", format!("got {}", other.name()))),
                }
            }),
        )
        .unwrap();
        bus
    }

    #[tokio::test]
    async fn dispatches_by_name() {
        let bus = hello_bus();
        let out = bus
            .dispatch(&Context::new(), Greeting::Hello("ana".to_string()))
            .await
            .unwrap();
        assert_eq!(out, "hello, ana");
    }

    #[tokio::test]
    async fn unregistered_name_is_rejected() {
        let bus = hello_bus();
        let err = bus.dispatch(&Context::new(), Greeting::Bye).await.unwrap_err();
        assert_eq!(err, BusError::Unregistered("bye".to_string()));
    }

    #[tokio::test]
    async fn handler_errors_are_returned_unchanged() {
        let mut bus = GreetingBus::new();
        bus.register(
            "bye",
            handler_fn(|_, _: Greeting| async {
                Err::<String, _>(BusError::handler("bye", "closed"))
            }),
        )
        .unwrap();

        let err = bus.dispatch(&Context::new(), Greeting::Bye).await.unwrap_err();
        assert_eq!(err, BusError::handler("bye", "closed"));
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut bus = hello_bus();
        let err = bus
            .register(
                "hello",
                handler_fn(|_, _: Greeting| async { Ok::<_, BusError>(String::new()) }),
            )
            .unwrap_err();
        assert_eq!(err, BusError::AlreadyRegistered("hello".to_string()));
        assert_eq!(bus.len(), 1);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut bus = GreetingBus::new();
        let err = bus
            .register("", handler_fn(|_, _: Greeting| async { Ok::<_, BusError>(String::new()) }))
            .unwrap_err();
        assert_eq!(err, BusError::EmptyName);
        assert!(bus.is_empty());
    }

    #[test]
    fn ensure_registered_reports_first_missing_name() {
        let bus = hello_bus();
        assert!(bus.ensure_registered(&["hello"]).is_ok());
        assert_eq!(
            bus.ensure_registered(&["hello", "bye", "later"]),
            Err(BusError::Unregistered("bye".to_string()))
        );
    }

    #[test]
    fn names_are_sorted() {
        let mut bus = hello_bus();
        bus.register("bye", handler_fn(|_, _: Greeting| async { Ok::<_, BusError>(String::new()) }))
            .unwrap();
        assert_eq!(bus.names(), vec!["bye", "hello"]);
        assert_eq!(format!("{bus:?}"), r#"Bus { handlers: ["bye", "hello"] }"#);
    }
}
