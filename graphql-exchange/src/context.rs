//! Cancellation and deadline context for an exchange.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Reason a [`Context`] is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The context was cancelled explicitly.
    #[error("context canceled")]
    Cancelled,
    /// The context deadline passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Carries cancellation and an optional deadline into an exchange.
///
/// The context is checked before any work starts and raced against the
/// transport call and the body drain.
///
/// ```
/// use graphql_exchange::Context;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ctx = Context::background().with_timeout(Duration::from_secs(1));
/// assert!(ctx.err().is_none());
///
/// ctx.cancel();
/// assert!(ctx.err().is_some());
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl Context {
    /// A context that is never done unless cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    /// Bound the context by a timeout, starting now.
    ///
    /// An earlier deadline already set on the context is kept.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Bound the context by an absolute deadline.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Use the given token for cancellation.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Cancel the context and every clone of it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Get the cancellation token.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Get the deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Report why the context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if deadline <= Instant::now() => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Wait until the context is done.
    pub async fn done(&self) -> ContextError {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => ContextError::Cancelled,
                _ = tokio::time::sleep_until(deadline) => ContextError::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                ContextError::Cancelled
            }
        }
    }

    /// Drive `future` to completion unless the context is done first.
    pub async fn run_until<F>(&self, future: F) -> Result<F::Output, ContextError>
    where
        F: Future,
    {
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            output = future => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_live() {
        let ctx = Context::background();
        assert!(ctx.err().is_none());
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_cancel_propagates_to_clones() {
        let ctx = Context::background();
        let clone = ctx.clone();
        ctx.cancel();
        assert_eq!(clone.err(), Some(ContextError::Cancelled));
    }

    #[test]
    fn test_shared_token() {
        let token = CancellationToken::new();
        let ctx = Context::background().with_cancellation(token.clone());
        token.cancel();
        assert_eq!(ctx.err(), Some(ContextError::Cancelled));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_exceeded() {
        let ctx = Context::background().with_timeout(Duration::from_millis(50));
        assert!(ctx.err().is_none());

        tokio::time::advance(Duration::from_millis(60)).await;
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_earlier_deadline_wins() {
        let ctx = Context::background()
            .with_timeout(Duration::from_millis(10))
            .with_timeout(Duration::from_secs(10));

        tokio::time::advance(Duration::from_millis(20)).await;
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_until_times_out() {
        let ctx = Context::background().with_timeout(Duration::from_millis(100));
        let result = ctx
            .run_until(tokio::time::sleep(Duration::from_secs(5)))
            .await;
        assert_eq!(result, Err(ContextError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn test_run_until_completes() {
        let ctx = Context::background();
        let result = ctx.run_until(async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_run_until_cancelled_first() {
        let ctx = Context::background();
        ctx.cancel();
        let result = ctx.run_until(async { 42 }).await;
        assert_eq!(result, Err(ContextError::Cancelled));
    }
}
