//! Error types for agent construction and lifecycle operations.

use super::AgentState;
use crate::error_code::{Classified, ErrorCode};
use std::fmt;
use thiserror::Error;

/// Error type returned by lifecycle hooks.
pub type HookError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type returned by lifecycle hooks.
pub type HookResult = Result<(), HookError>;

/// Identifies which lifecycle hook produced a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// Runs while the agent is `starting`.
    Start,
    /// Runs while the agent is `stopping`.
    Stop,
    /// Runs while the agent is still `running`, before it pauses.
    Pause,
    /// Runs while the agent is still `paused`, before it resumes.
    Resume,
}

impl HookKind {
    /// Returns the hook name used in messages and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "on_start",
            Self::Stop => "on_stop",
            Self::Pause => "on_pause",
            Self::Resume => "on_resume",
        }
    }
}

impl fmt::Display for HookKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Reason a lifecycle context refused further work.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ContextError {
    /// The context was cancelled.
    #[error("context cancelled")]
    Cancelled,
    /// The context deadline has passed.
    #[error("context deadline exceeded")]
    DeadlineExceeded,
}

/// Errors returned by agent construction and lifecycle operations.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The agent identifier is empty.
    #[error("agent id must not be empty")]
    EmptyAgentId,

    /// The agent name is empty.
    #[error("agent name must not be empty")]
    EmptyAgentName,

    /// The agent version is empty.
    #[error("agent version must not be empty")]
    EmptyAgentVersion,

    /// A capability name is empty.
    #[error("capability name must not be empty")]
    EmptyCapabilityName,

    /// A capability version is empty.
    #[error("capability '{0}' version must not be empty")]
    EmptyCapabilityVersion(String),

    /// The transition table does not allow the requested state change.
    #[error("invalid state transition: {from} -> {to}")]
    InvalidTransition {
        /// State the agent was in.
        from: AgentState,
        /// Requested target state.
        to: AgentState,
    },

    /// A lifecycle hook returned an error. The agent is left `failed`.
    #[error("{hook} hook failed")]
    HookFailed {
        /// Hook that failed.
        hook: HookKind,
        /// Error returned by the hook.
        #[source]
        source: HookError,
    },

    /// The agent is not running.
    #[error("agent is not running (current state: {0})")]
    NotRunning(AgentState),

    /// The supplied context was already done when the operation began.
    #[error(transparent)]
    Context(#[from] ContextError),
}

impl Classified for AgentError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::EmptyAgentId
            | Self::EmptyAgentName
            | Self::EmptyAgentVersion
            | Self::EmptyCapabilityName
            | Self::EmptyCapabilityVersion(_) => ErrorCode::Validation,
            Self::InvalidTransition { .. } => ErrorCode::Conflict,
            Self::HookFailed { .. } => ErrorCode::Internal,
            Self::NotRunning(_) => ErrorCode::Unavailable,
            Self::Context(_) => ErrorCode::Timeout,
        }
    }
}

/// Error returned while parsing an agent state name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown agent state: '{0}'")]
pub struct ParseAgentStateError(pub String);
