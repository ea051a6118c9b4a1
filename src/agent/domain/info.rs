//! Point-in-time agent snapshot.

use super::{AgentState, Capability};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Immutable snapshot of an agent's identity and lifecycle.
///
/// `started_at` and uptime are only reported while the agent is `running`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentInfo {
    id: String,
    name: String,
    version: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    capabilities: Vec<Capability>,
    state: AgentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    uptime_ms: u64,
}

/// Parameter object for [`AgentInfo::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentInfoData {
    /// Agent identifier.
    pub id: String,
    /// Agent name.
    pub name: String,
    /// Agent version.
    pub version: String,
    /// Copy of the agent's capabilities.
    pub capabilities: Vec<Capability>,
    /// Current state.
    pub state: AgentState,
    /// Start of the current run cycle, if one is recorded.
    pub started_at: Option<DateTime<Utc>>,
    /// Time at which the snapshot is taken.
    pub observed_at: DateTime<Utc>,
}

impl AgentInfo {
    /// Builds a snapshot, hiding the start timestamp unless `running`.
    #[must_use]
    pub fn new(data: AgentInfoData) -> Self {
        let started_at = data
            .started_at
            .filter(|_| data.state == AgentState::Running);
        let uptime_ms = started_at
            .and_then(|started| (data.observed_at - started).num_milliseconds().try_into().ok())
            .unwrap_or(0);

        Self {
            id: data.id,
            name: data.name,
            version: data.version,
            capabilities: data.capabilities,
            state: data.state,
            started_at,
            uptime_ms,
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

    /// Returns the advertised capabilities.
    #[must_use]
    pub fn capabilities(&self) -> &[Capability] {
        &self.capabilities
    }

    /// Returns the state at snapshot time.
    #[must_use]
    pub const fn state(&self) -> AgentState {
        self.state
    }

    /// Returns when the current run cycle started, if `running`.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns time spent running, zero unless `running`.
    #[must_use]
    pub const fn uptime(&self) -> Duration {
        Duration::from_millis(self.uptime_ms)
    }
}
