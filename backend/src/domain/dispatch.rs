//! Typed request dispatch.
//!
//! The dispatcher decouples inbound adapters from use-case handlers. Each
//! [`Request`] type names its output; exactly one [`RequestHandler`] may be
//! registered per `(request, output)` pair. Dispatching a request with no
//! registered handler is a wiring error and fails fast with
//! [`DispatchError::MissingHandler`].

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{Interrupted, RequestContext, TraceId};

/// A message routed through the [`Dispatcher`].
pub trait Request: Send + 'static {
    /// Value produced by the handler.
    type Output: Send + 'static;
}

/// Handles one [`Request`] type.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    /// Handle `request` within `ctx`.
    async fn handle(&self, ctx: &RequestContext, request: R) -> R::Output;
}

/// Errors raised while registering or dispatching requests.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No handler is registered for the request.
    #[error("no handler registered for {request} -> {output}")]
    MissingHandler {
        /// Request type name.
        request: &'static str,
        /// Output type name.
        output: &'static str,
    },
    /// A handler is already registered for the request.
    #[error("a handler is already registered for {request} -> {output}")]
    DuplicateHandler {
        /// Request type name.
        request: &'static str,
        /// Output type name.
        output: &'static str,
    },
    /// The request context was cancelled while the handler ran.
    #[error("{request} was cancelled")]
    Cancelled {
        /// Request type name.
        request: &'static str,
    },
    /// The request deadline elapsed while the handler ran.
    #[error("{request} timed out")]
    TimedOut {
        /// Request type name.
        request: &'static str,
    },
}

type HandlerKey = (TypeId, TypeId);

fn key_for<R: Request>() -> HandlerKey {
    (TypeId::of::<R>(), TypeId::of::<R::Output>())
}

/// Collects handler registrations before building a [`Dispatcher`].
#[derive(Default)]
pub struct DispatcherBuilder {
    // Each value is an `Arc<dyn RequestHandler<R>>` for the keyed `R`.
    handlers: HashMap<HandlerKey, Box<dyn Any + Send + Sync>>,
}

impl DispatcherBuilder {
    /// Empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for requests of type `R`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::DuplicateHandler`] when `R` already has a
    /// handler.
    pub fn register<R, H>(&mut self, handler: H) -> Result<&mut Self, DispatchError>
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let key = key_for::<R>();
        if self.handlers.contains_key(&key) {
            return Err(DispatchError::DuplicateHandler {
                request: type_name::<R>(),
                output: type_name::<R::Output>(),
            });
        }
        let handler: Arc<dyn RequestHandler<R>> = Arc::new(handler);
        self.handlers.insert(key, Box::new(handler));
        Ok(self)
    }

    /// Freeze the registrations.
    #[must_use]
    pub fn build(self) -> Dispatcher {
        Dispatcher {
            handlers: Arc::new(self.handlers),
        }
    }
}

/// Routes requests to their registered handler.
///
/// Cloning is cheap; clones share the registry.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use recipe_backend::domain::{
///     DispatchError, DispatcherBuilder, Request, RequestContext, RequestHandler,
/// };
///
/// struct Ping;
/// impl Request for Ping {
///     type Output = &'static str;
/// }
///
/// struct PingHandler;
/// #[async_trait]
/// impl RequestHandler<Ping> for PingHandler {
///     async fn handle(&self, _ctx: &RequestContext, _request: Ping) -> &'static str {
///         "pong"
///     }
/// }
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let mut builder = DispatcherBuilder::new();
/// builder.register::<Ping, _>(PingHandler).expect("first registration");
/// let dispatcher = builder.build();
///
/// let ctx = RequestContext::new();
/// assert_eq!(dispatcher.dispatch(&ctx, Ping).await, Ok("pong"));
/// # });
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    handlers: Arc<HashMap<HandlerKey, Box<dyn Any + Send + Sync>>>,
}

impl Dispatcher {
    /// Whether a handler is registered for `R`.
    pub fn handles<R: Request>(&self) -> bool {
        self.handlers.contains_key(&key_for::<R>())
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    fn resolve<R: Request>(&self) -> Result<Arc<dyn RequestHandler<R>>, DispatchError> {
        self.handlers
            .get(&key_for::<R>())
            .and_then(|entry| entry.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .cloned()
            .ok_or(DispatchError::MissingHandler {
                request: type_name::<R>(),
                output: type_name::<R::Output>(),
            })
    }

    /// Resolve the handler for `R` and run it within `ctx`.
    ///
    /// The handler runs with the context's trace identifier in scope and is
    /// abandoned when the context is cancelled or its deadline passes.
    ///
    /// # Errors
    ///
    /// [`DispatchError::MissingHandler`] when no handler is registered,
    /// [`DispatchError::Cancelled`] or [`DispatchError::TimedOut`] when the
    /// context interrupts the handler.
    pub async fn dispatch<R: Request>(
        &self,
        ctx: &RequestContext,
        request: R,
    ) -> Result<R::Output, DispatchError> {
        let handler = self.resolve::<R>()?;
        let run = ctx.run(handler.handle(ctx, request));
        let outcome = match ctx.trace_id() {
            Some(trace_id) if TraceId::current().is_none() => TraceId::scope(trace_id, run).await,
            _ => run.await,
        };
        outcome.map_err(|interrupted| match interrupted {
            Interrupted::Cancelled => DispatchError::Cancelled {
                request: type_name::<R>(),
            },
            Interrupted::TimedOut => DispatchError::TimedOut {
                request: type_name::<R>(),
            },
        })
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
