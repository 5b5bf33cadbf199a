//! Per-request execution context.
//!
//! A [`RequestContext`] travels from the inbound adapter through the
//! dispatcher into every port call. It carries a cooperative cancellation
//! token, an optional deadline and the request trace identifier. Adapters
//! wrap their storage futures with [`RequestContext::run`] so a cancelled or
//! expired request aborts the in-flight call instead of finishing it.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::TraceId;

/// Reason a context-bound future stopped before completing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Interrupted {
    /// The cancellation token fired.
    #[error("request was cancelled")]
    Cancelled,
    /// The deadline elapsed.
    #[error("request deadline elapsed")]
    TimedOut,
}

/// Cancellation, deadline and correlation data for one logical request.
///
/// Cloning shares the cancellation token: cancelling any clone cancels all.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use recipe_backend::domain::{Interrupted, RequestContext};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));
/// assert_eq!(ctx.run(async { 7 }).await, Ok(7));
///
/// ctx.cancel();
/// assert_eq!(ctx.run(async { 7 }).await, Err(Interrupted::Cancelled));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
    trace_id: Option<TraceId>,
}

impl RequestContext {
    /// Context with a fresh token, no deadline and no trace identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deadline `timeout` from now.
    ///
    /// A timeout too large to represent as an instant leaves the context
    /// without a deadline.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self,
        }
    }

    /// Set an absolute deadline. An earlier existing deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Attach the request trace identifier.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Cancellation token shared by every clone of this context.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Deadline, if one was set.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Trace identifier, if one was attached.
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Signal cancellation to every holder of the context.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the context was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Drive `fut` to completion unless the context is cancelled or its
    /// deadline passes first. The losing future is dropped.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Interrupted>
    where
        F: Future,
    {
        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            () = self.token.cancelled() => Err(Interrupted::Cancelled),
            () = deadline => Err(Interrupted::TimedOut),
            output = fut => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn run_returns_output_when_uninterrupted() {
        let ctx = RequestContext::new();
        assert_eq!(ctx.run(async { "done" }).await, Ok("done"));
    }

    #[rstest]
    #[tokio::test]
    async fn run_reports_cancellation() {
        let ctx = RequestContext::new();
        let clone = ctx.clone();
        clone.cancel();

        let result = ctx.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(Interrupted::Cancelled));
        assert!(ctx.is_cancelled());
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn run_reports_elapsed_deadline() {
        let ctx = RequestContext::new().with_timeout(Duration::from_millis(50));
        let result = ctx
            .run(tokio::time::sleep(Duration::from_secs(60)))
            .await;
        assert_eq!(result, Err(Interrupted::TimedOut));
    }

    #[rstest]
    #[case(Duration::MAX)]
    #[case(Duration::from_secs(u64::MAX))]
    #[tokio::test]
    async fn unrepresentable_timeout_leaves_no_deadline(#[case] timeout: Duration) {
        let ctx = RequestContext::new().with_timeout(timeout);
        assert_eq!(ctx.deadline(), None);
        assert_eq!(ctx.run(async { 3 }).await, Ok(3));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn with_deadline_keeps_earliest() {
        let now = Instant::now();
        let early = now + Duration::from_secs(1);
        let late = now + Duration::from_secs(10);
        let ctx = RequestContext::new().with_deadline(early).with_deadline(late);
        assert_eq!(ctx.deadline(), Some(early));
    }

    #[rstest]
    fn trace_id_is_carried() {
        let trace_id = TraceId::generate();
        let ctx = RequestContext::new().with_trace_id(trace_id);
        assert_eq!(ctx.trace_id(), Some(trace_id));
    }
}
