//! Agent construction and lifecycle orchestration.

mod agent;
mod builder;

pub use agent::Agent;
pub use builder::AgentBuilder;
