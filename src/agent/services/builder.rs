//! Fluent construction of [`Agent`] values.

use super::agent::{Agent, AgentParts, LifecycleHooks};
use crate::agent::{
    domain::{AgentError, AgentState, Capability},
    ports::{LifecycleHook, StateChangeHandler},
};
use crate::config::AgentConfig;
use mockable::{Clock, DefaultClock};
use std::sync::Arc;
use tracing::Dispatch;

/// Accumulates agent settings and validates them in [`AgentBuilder::build`].
///
/// No validation happens until `build`, so settings may be supplied in any
/// order.
///
/// # Examples
///
/// ```
/// use keel::agent::{domain::AgentState, services::AgentBuilder};
///
/// let agent = AgentBuilder::new("agent-001", "test-agent", "1.0.0")
///     .on_state_change(|from, to| println!("{from} -> {to}"))
///     .build()
///     .expect("identity is valid");
/// assert_eq!(agent.state(), AgentState::Unknown);
/// ```
#[must_use]
pub struct AgentBuilder {
    id: String,
    name: String,
    version: String,
    capabilities: Vec<Capability>,
    logger: Option<Dispatch>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    hooks: LifecycleHooks,
    handlers: Vec<StateChangeHandler>,
}

impl AgentBuilder {
    /// Starts a builder for the given identity.
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            capabilities: Vec::new(),
            logger: None,
            clock: None,
            hooks: LifecycleHooks::default(),
            handlers: Vec::new(),
        }
    }

    /// Starts a builder from loaded configuration.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(&config.id, &config.name, &config.version)
            .with_capabilities(config.capabilities.iter().cloned())
    }

    /// Adds one capability.
    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    /// Adds several capabilities, keeping their order.
    pub fn with_capabilities(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.capabilities.extend(capabilities);
        self
    }

    /// Routes the agent's diagnostics to `logger` instead of the ambient
    /// subscriber.
    pub fn with_logger(mut self, logger: Dispatch) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Replaces the clock used for start timestamps and uptime.
    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the hook run while `starting`.
    pub fn with_on_start(mut self, hook: impl LifecycleHook + 'static) -> Self {
        self.hooks.on_start = Some(Arc::new(hook));
        self
    }

    /// Sets the hook run while `stopping`.
    pub fn with_on_stop(mut self, hook: impl LifecycleHook + 'static) -> Self {
        self.hooks.on_stop = Some(Arc::new(hook));
        self
    }

    /// Sets the hook run before pausing.
    pub fn with_on_pause(mut self, hook: impl LifecycleHook + 'static) -> Self {
        self.hooks.on_pause = Some(Arc::new(hook));
        self
    }

    /// Sets the hook run before resuming.
    pub fn with_on_resume(mut self, hook: impl LifecycleHook + 'static) -> Self {
        self.hooks.on_resume = Some(Arc::new(hook));
        self
    }

    /// Registers a state-change handler. Handlers are notified in
    /// registration order.
    pub fn on_state_change<F>(mut self, handler: F) -> Self
    where
        F: Fn(AgentState, AgentState) + Send + Sync + 'static,
    {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Validates the settings and creates an agent in state `unknown`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyAgentId`], [`AgentError::EmptyAgentName`],
    /// or [`AgentError::EmptyAgentVersion`] for an empty identity field, checked
    /// in that order. Otherwise returns the first capability error, in
    /// registration order.
    pub fn build(self) -> Result<Agent, AgentError> {
        if self.id.is_empty() {
            return Err(AgentError::EmptyAgentId);
        }
        if self.name.is_empty() {
            return Err(AgentError::EmptyAgentName);
        }
        if self.version.is_empty() {
            return Err(AgentError::EmptyAgentVersion);
        }
        self.capabilities.iter().try_for_each(Capability::validate)?;

        Ok(Agent::from_parts(AgentParts {
            id: self.id,
            name: self.name,
            version: self.version,
            capabilities: self.capabilities,
            hooks: self.hooks,
            handlers: self.handlers,
            logger: self.logger,
            clock: self.clock.unwrap_or_else(default_clock),
        }))
    }
}

fn default_clock() -> Arc<dyn Clock + Send + Sync> {
    Arc::new(DefaultClock)
}
