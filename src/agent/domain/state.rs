//! Agent lifecycle state and the transition table.

use super::ParseAgentStateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    /// Agent has been built but never started.
    Unknown,
    /// Agent is running its start hook.
    Starting,
    /// Agent is running.
    Running,
    /// Agent is paused and may be resumed.
    Paused,
    /// Agent is running its stop hook.
    Stopping,
    /// Agent has stopped. It may only be restarted.
    Stopped,
    /// A lifecycle hook failed. The agent may only be restarted.
    Failed,
}

impl AgentState {
    /// Every defined state, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Unknown,
        Self::Starting,
        Self::Running,
        Self::Paused,
        Self::Stopping,
        Self::Stopped,
        Self::Failed,
    ];

    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        }
    }

    /// Returns whether `value` names one of the defined states.
    ///
    /// The empty string is not a state.
    #[must_use]
    pub fn is_valid(value: &str) -> bool {
        Self::try_from(value).is_ok()
    }

    /// Returns whether this state ends a run cycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Stopped | Self::Failed)
    }

    /// Returns the states reachable from this state in one transition.
    #[must_use]
    pub const fn allowed_targets(self) -> &'static [Self] {
        match self {
            Self::Unknown => &[Self::Starting, Self::Failed],
            Self::Starting => &[Self::Running, Self::Failed, Self::Stopping],
            Self::Running => &[Self::Paused, Self::Stopping, Self::Failed],
            Self::Paused => &[Self::Running, Self::Stopping, Self::Failed],
            Self::Stopping => &[Self::Stopped, Self::Failed],
            Self::Stopped | Self::Failed => &[Self::Starting],
        }
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// A state never transitions to itself.
    #[must_use]
    pub fn can_transition_to(self, target: Self) -> bool {
        self != target && self.allowed_targets().contains(&target)
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AgentState {
    type Error = ParseAgentStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "unknown" => Ok(Self::Unknown),
            "starting" => Ok(Self::Starting),
            "running" => Ok(Self::Running),
            "paused" => Ok(Self::Paused),
            "stopping" => Ok(Self::Stopping),
            "stopped" => Ok(Self::Stopped),
            "failed" => Ok(Self::Failed),
            _ => Err(ParseAgentStateError(value.to_owned())),
        }
    }
}
