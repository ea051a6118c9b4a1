//! Domain model for agent lifecycle management.
//!
//! The agent domain models lifecycle states and their transition table,
//! advertised capabilities, the error taxonomy for lifecycle operations, and
//! the snapshot reported to callers. No locking or async concerns live here.

mod capability;
mod error;
mod info;
mod state;

pub use capability::Capability;
pub use error::{AgentError, ContextError, HookError, HookKind, HookResult, ParseAgentStateError};
pub use info::{AgentInfo, AgentInfoData};
pub use state::AgentState;
