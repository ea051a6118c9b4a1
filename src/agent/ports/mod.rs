//! Port contracts for agent lifecycle extension points.

mod context;
mod hook;

#[cfg(test)]
pub use hook::MockLifecycleHook;
pub use context::LifecycleContext;
pub use hook::{FnHook, LifecycleHook, StateChangeHandler, hook_fn};
