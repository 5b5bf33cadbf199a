//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the dispatcher and remain testable without I/O.

use std::time::Duration;

use crate::domain::{Dispatcher, RequestContext, TraceId};

/// Deadline used when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Dependency bundle for HTTP handlers.
#[derive(Clone, Debug)]
pub struct HttpState {
    pub dispatcher: Dispatcher,
    pub request_timeout: Duration,
}

impl HttpState {
    /// State dispatching through `dispatcher` with the default deadline.
    ///
    /// # Examples
    /// ```
    /// use recipe_backend::domain::DispatcherBuilder;
    /// use recipe_backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(DispatcherBuilder::new().build());
    /// assert!(state.dispatcher.is_empty());
    /// ```
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Replace the per-request deadline.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Context for one request: the configured deadline plus the trace
    /// identifier assigned by the trace middleware.
    pub fn request_context(&self) -> RequestContext {
        let ctx = RequestContext::new().with_timeout(self.request_timeout);
        match TraceId::current() {
            Some(trace_id) => ctx.with_trace_id(trace_id),
            None => ctx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DispatcherBuilder;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn request_context_applies_configured_timeout() {
        let state = HttpState::new(DispatcherBuilder::new().build())
            .with_request_timeout(Duration::from_secs(5));
        assert!(state.request_context().deadline().is_some());
    }

    #[rstest]
    #[tokio::test]
    async fn huge_timeout_yields_context_without_deadline() {
        let state = HttpState::new(DispatcherBuilder::new().build())
            .with_request_timeout(Duration::from_secs(u64::MAX));
        assert_eq!(state.request_context().deadline(), None);
    }
}
