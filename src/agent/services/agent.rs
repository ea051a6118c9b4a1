//! The lifecycle-managed agent.

use crate::agent::{
    domain::{AgentError, AgentInfo, AgentInfoData, AgentState, Capability, HookKind},
    ports::{LifecycleContext, LifecycleHook, StateChangeHandler},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::Dispatch;

/// Optional hooks run by the lifecycle operations.
#[derive(Clone, Default)]
pub(super) struct LifecycleHooks {
    pub(super) on_start: Option<Arc<dyn LifecycleHook>>,
    pub(super) on_stop: Option<Arc<dyn LifecycleHook>>,
    pub(super) on_pause: Option<Arc<dyn LifecycleHook>>,
    pub(super) on_resume: Option<Arc<dyn LifecycleHook>>,
}

impl LifecycleHooks {
    fn get(&self, kind: HookKind) -> Option<&Arc<dyn LifecycleHook>> {
        match kind {
            HookKind::Start => self.on_start.as_ref(),
            HookKind::Stop => self.on_stop.as_ref(),
            HookKind::Pause => self.on_pause.as_ref(),
            HookKind::Resume => self.on_resume.as_ref(),
        }
    }
}

/// Validated inputs assembled by [`super::AgentBuilder`].
pub(super) struct AgentParts {
    pub(super) id: String,
    pub(super) name: String,
    pub(super) version: String,
    pub(super) capabilities: Vec<Capability>,
    pub(super) hooks: LifecycleHooks,
    pub(super) handlers: Vec<StateChangeHandler>,
    pub(super) logger: Option<Dispatch>,
    pub(super) clock: Arc<dyn Clock + Send + Sync>,
}

/// Mutable lifecycle fields, guarded together by one lock.
#[derive(Debug, Clone, Copy)]
struct Lifecycle {
    state: AgentState,
    started_at: Option<DateTime<Utc>>,
}

/// A long-running worker governed by the lifecycle state machine.
///
/// All state changes go through [`Agent::set_state`], which validates the
/// transition and notifies state-change handlers under a single write lock.
/// Concurrent callers racing for the same transition see exactly one winner;
/// the rest receive [`AgentError::InvalidTransition`].
///
/// The agent owns no background task. It is driven entirely by its callers
/// and may be shared between them behind an [`Arc`].
pub struct Agent {
    id: String,
    name: String,
    version: String,
    capabilities: Vec<Capability>,
    lifecycle: RwLock<Lifecycle>,
    hooks: LifecycleHooks,
    handlers: Vec<StateChangeHandler>,
    logger: Option<Dispatch>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Agent {
    pub(super) fn from_parts(parts: AgentParts) -> Self {
        Self {
            id: parts.id,
            name: parts.name,
            version: parts.version,
            capabilities: parts.capabilities,
            lifecycle: RwLock::new(Lifecycle {
                state: AgentState::Unknown,
                started_at: None,
            }),
            hooks: parts.hooks,
            handlers: parts.handlers,
            logger: parts.logger,
            clock: parts.clock,
        }
    }

    /// Returns the agent identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the agent name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the agent version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns a copy of the advertised capabilities.
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        self.capabilities.clone()
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub fn state(&self) -> AgentState {
        self.read_lifecycle().state
    }

    /// Moves the agent to `to` and notifies every state-change handler.
    ///
    /// Handlers run in registration order while the write lock is held. A
    /// panicking handler is logged and does not stop the remaining handlers
    /// or undo the transition.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidTransition`] when the transition table
    /// does not allow moving from the current state to `to`. The state is
    /// left unchanged.
    pub fn set_state(&self, to: AgentState) -> Result<(), AgentError> {
        self.transition(to, |_| {})
    }

    /// Starts the agent: `starting`, then the start hook, then `running`.
    ///
    /// The start hook observes `starting`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Context`] when `ctx` is already done,
    /// [`AgentError::InvalidTransition`] when the agent cannot start from its
    /// current state, or [`AgentError::HookFailed`] when the start hook
    /// fails, in which case the agent is left `failed`.
    pub async fn start(&self, ctx: &LifecycleContext) -> Result<(), AgentError> {
        ctx.check()?;
        self.set_state(AgentState::Starting)?;
        self.run_hook(HookKind::Start, ctx).await?;

        let started_at = self.clock.utc();
        self.transition(AgentState::Running, |lifecycle| {
            lifecycle.started_at = Some(started_at);
        })
    }

    /// Stops the agent: `stopping`, then the stop hook, then `stopped`.
    ///
    /// Stopping an already stopped agent succeeds without running the hook
    /// or notifying handlers.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Context`] when `ctx` is already done,
    /// [`AgentError::InvalidTransition`] when the agent cannot stop from its
    /// current state, or [`AgentError::HookFailed`] when the stop hook fails,
    /// in which case the agent is left `failed`.
    pub async fn stop(&self, ctx: &LifecycleContext) -> Result<(), AgentError> {
        ctx.check()?;
        if self.state() == AgentState::Stopped {
            return Ok(());
        }
        self.set_state(AgentState::Stopping)?;
        self.run_hook(HookKind::Stop, ctx).await?;

        self.transition(AgentState::Stopped, |lifecycle| {
            lifecycle.started_at = None;
        })
    }

    /// Pauses a running agent.
    ///
    /// There is no intermediate state: the pause hook observes `running`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Context`] when `ctx` is already done,
    /// [`AgentError::InvalidTransition`] unless the agent is `running`, or
    /// [`AgentError::HookFailed`] when the pause hook fails, in which case the
    /// agent is left `failed`.
    pub async fn pause(&self, ctx: &LifecycleContext) -> Result<(), AgentError> {
        ctx.check()?;
        self.ensure_state(AgentState::Running, AgentState::Paused)?;
        self.run_hook(HookKind::Pause, ctx).await?;
        self.set_state(AgentState::Paused)
    }

    /// Resumes a paused agent.
    ///
    /// The resume hook observes `paused`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::Context`] when `ctx` is already done,
    /// [`AgentError::InvalidTransition`] unless the agent is `paused`, or
    /// [`AgentError::HookFailed`] when the resume hook fails, in which case
    /// the agent is left `failed`.
    pub async fn resume(&self, ctx: &LifecycleContext) -> Result<(), AgentError> {
        ctx.check()?;
        self.ensure_state(AgentState::Paused, AgentState::Running)?;
        self.run_hook(HookKind::Resume, ctx).await?;
        self.set_state(AgentState::Running)
    }

    /// Reports whether the agent is serving.
    ///
    /// Only the current state is consulted; a done context does not make a
    /// running agent unhealthy.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NotRunning`] with the current state unless the
    /// agent is `running`.
    pub fn health(&self, _ctx: &LifecycleContext) -> Result<(), AgentError> {
        match self.state() {
            AgentState::Running => Ok(()),
            state => Err(AgentError::NotRunning(state)),
        }
    }

    /// Returns a snapshot of identity, capabilities, and lifecycle.
    #[must_use]
    pub fn info(&self) -> AgentInfo {
        let lifecycle = *self.read_lifecycle();
        AgentInfo::new(AgentInfoData {
            id: self.id.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
            capabilities: self.capabilities(),
            state: lifecycle.state,
            started_at: lifecycle.started_at,
            observed_at: self.clock.utc(),
        })
    }

    fn read_lifecycle(&self) -> RwLockReadGuard<'_, Lifecycle> {
        self.lifecycle.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_lifecycle(&self) -> RwLockWriteGuard<'_, Lifecycle> {
        self.lifecycle.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validates and applies a transition, then notifies handlers.
    ///
    /// `update` runs under the same lock as the state change.
    fn transition(
        &self,
        to: AgentState,
        update: impl FnOnce(&mut Lifecycle),
    ) -> Result<(), AgentError> {
        let mut lifecycle = self.write_lifecycle();
        self.apply(&mut lifecycle, to, update)
    }

    /// Applies a transition through an already held write guard.
    fn apply(
        &self,
        lifecycle: &mut Lifecycle,
        to: AgentState,
        update: impl FnOnce(&mut Lifecycle),
    ) -> Result<(), AgentError> {
        let from = lifecycle.state;
        if !from.can_transition_to(to) {
            return Err(AgentError::InvalidTransition { from, to });
        }

        lifecycle.state = to;
        update(lifecycle);
        self.log(|| tracing::debug!(agent_id = %self.id, %from, %to, "agent state changed"));
        self.notify(from, to);
        Ok(())
    }

    /// Moves to `failed` when a hook future was dropped mid-flight.
    ///
    /// Only fires while the agent is still in the transient state the
    /// interrupted operation left it in.
    fn abandon_hook(&self, kind: HookKind, during: AgentState) {
        self.log(|| {
            tracing::warn!(
                agent_id = %self.id,
                hook = %kind,
                state = %during,
                "lifecycle hook dropped before completion"
            );
        });
        let mut lifecycle = self.write_lifecycle();
        if lifecycle.state != during {
            return;
        }
        if let Err(err) = self.apply(&mut lifecycle, AgentState::Failed, |_| {}) {
            self.log(|| {
                tracing::warn!(agent_id = %self.id, error = %err, "could not mark agent failed");
            });
        }
    }

    fn notify(&self, from: AgentState, to: AgentState) {
        for (index, handler) in self.handlers.iter().enumerate() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler(from, to)));
            if let Err(payload) = outcome {
                let message = panic_message(payload.as_ref());
                self.log(|| {
                    tracing::warn!(
                        agent_id = %self.id,
                        handler = index,
                        %from,
                        %to,
                        panic = message,
                        "state change handler panicked"
                    );
                });
            }
        }
    }

    fn ensure_state(&self, expected: AgentState, target: AgentState) -> Result<(), AgentError> {
        let current = self.state();
        if current == expected {
            Ok(())
        } else {
            Err(AgentError::InvalidTransition {
                from: current,
                to: target,
            })
        }
    }

    /// Runs the hook for `kind`, moving to `failed` when it errors.
    async fn run_hook(&self, kind: HookKind, ctx: &LifecycleContext) -> Result<(), AgentError> {
        let Some(hook) = self.hooks.get(kind).cloned() else {
            return Ok(());
        };

        let mut guard = AbandonGuard::new(self, kind);
        let outcome = hook.run(ctx.clone()).await;
        guard.disarm();

        match outcome {
            Ok(()) => Ok(()),
            Err(source) => {
                self.log(|| {
                    tracing::error!(
                        agent_id = %self.id,
                        hook = %kind,
                        error = %source,
                        "lifecycle hook failed"
                    );
                });
                if let Err(err) = self.set_state(AgentState::Failed) {
                    self.log(|| {
                        tracing::warn!(
                            agent_id = %self.id,
                            error = %err,
                            "could not mark agent failed"
                        );
                    });
                }
                Err(AgentError::HookFailed { hook: kind, source })
            }
        }
    }

    fn log(&self, emit: impl FnOnce()) {
        match &self.logger {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, emit),
            None => emit(),
        }
    }
}

/// Marks the agent failed if a `starting`/`stopping` hook is dropped.
struct AbandonGuard<'a> {
    agent: &'a Agent,
    kind: HookKind,
    during: Option<AgentState>,
}

impl<'a> AbandonGuard<'a> {
    fn new(agent: &'a Agent, kind: HookKind) -> Self {
        let during = match kind {
            HookKind::Start => Some(AgentState::Starting),
            HookKind::Stop => Some(AgentState::Stopping),
            HookKind::Pause | HookKind::Resume => None,
        };
        Self {
            agent,
            kind,
            during,
        }
    }

    fn disarm(&mut self) {
        self.during = None;
    }
}

impl Drop for AbandonGuard<'_> {
    fn drop(&mut self) {
        if let Some(during) = self.during.take() {
            self.agent.abandon_hook(self.kind, during);
        }
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lifecycle = *self.read_lifecycle();
        formatter
            .debug_struct("Agent")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("version", &self.version)
            .field("capabilities", &self.capabilities)
            .field("state", &lifecycle.state)
            .field("started_at", &lifecycle.started_at)
            .field("handlers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
