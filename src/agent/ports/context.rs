//! Cancellation and deadline context passed to lifecycle operations.

use crate::agent::domain::ContextError;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Carries cooperative cancellation and an optional deadline.
///
/// Lifecycle operations refuse to begin when the context is already done.
/// Hooks receive the same context and are expected to honour it themselves;
/// the agent never interrupts a running hook.
#[derive(Debug, Clone, Default)]
pub struct LifecycleContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl LifecycleContext {
    /// Creates a context with no deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a context that observes an existing cancellation token.
    #[must_use]
    pub const fn from_token(token: CancellationToken) -> Self {
        Self {
            token,
            deadline: None,
        }
    }

    /// Sets an absolute deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets a deadline relative to now.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Derives a context that is cancelled with this one but can also be
    /// cancelled on its own.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    /// Cancels this context and every child derived from it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the underlying cancellation token.
    #[must_use]
    pub const fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Returns whether the context has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Reports whether the context is done.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::Cancelled`] after cancellation, or
    /// [`ContextError::DeadlineExceeded`] once the deadline has passed.
    pub fn check(&self) -> Result<(), ContextError> {
        if self.token.is_cancelled() {
            return Err(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(ContextError::DeadlineExceeded),
            _ => Ok(()),
        }
    }

    /// Waits until the context is cancelled.
    pub async fn cancelled(&self) {
        self.token.cancelled().await;
    }
}
