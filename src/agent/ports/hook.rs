//! Extension points invoked during lifecycle operations.

use super::LifecycleContext;
use crate::agent::domain::{AgentState, HookResult};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// Caller-supplied work run at a lifecycle transition point.
///
/// Hooks run outside the agent's lock, so they may read the agent's state.
/// An error moves the agent to `failed`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LifecycleHook: Send + Sync {
    /// Runs the hook.
    async fn run(&self, ctx: LifecycleContext) -> HookResult;
}

/// Observer notified after every successful transition with `(from, to)`.
///
/// Handlers run while the agent's write lock is held. They must return
/// quickly and must not call the agent's mutating methods, which would
/// deadlock. A panicking handler is logged and skipped.
pub type StateChangeHandler = Arc<dyn Fn(AgentState, AgentState) + Send + Sync>;

/// [`LifecycleHook`] backed by a closure. Created by [`hook_fn`].
pub struct FnHook<F>(F);

/// Wraps an async closure as a [`LifecycleHook`].
pub const fn hook_fn<F, Fut>(hook: F) -> FnHook<F>
where
    F: Fn(LifecycleContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    FnHook(hook)
}

#[async_trait]
impl<F, Fut> LifecycleHook for FnHook<F>
where
    F: Fn(LifecycleContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HookResult> + Send + 'static,
{
    async fn run(&self, ctx: LifecycleContext) -> HookResult {
        (self.0)(ctx).await
    }
}
