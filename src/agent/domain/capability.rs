//! Capabilities advertised by an agent.

use super::AgentError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One discrete, versioned feature an agent exposes.
///
/// `name` and `version` are checked once, when the capability is created
/// through [`Capability::new`]. Capabilities deserialized from configuration
/// skip that check and are validated again when an agent is built.
///
/// Cloning copies the metadata map, so a capability handed out by an agent
/// never shares storage with the agent's own list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    name: String,
    version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<BTreeMap<String, String>>,
}

impl Capability {
    /// Creates a validated capability.
    ///
    /// An empty metadata map is stored as absent.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::EmptyCapabilityName`] when `name` is empty, or
    /// [`AgentError::EmptyCapabilityVersion`] when `version` is empty.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
        metadata: Option<BTreeMap<String, String>>,
    ) -> Result<Self, AgentError> {
        let capability = Self {
            name: name.into(),
            version: version.into(),
            description: description.into(),
            metadata: metadata.filter(|entries| !entries.is_empty()),
        };
        capability.validate()?;
        Ok(capability)
    }

    /// Returns the capability name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the capability version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the free-text description, empty when none was given.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the metadata map, if any.
    #[must_use]
    pub const fn metadata(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata.as_ref()
    }

    /// Returns a single metadata value.
    #[must_use]
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|entries| entries.get(key))
            .map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn metadata_mut(&mut self) -> &mut BTreeMap<String, String> {
        self.metadata.get_or_insert_with(BTreeMap::new)
    }

    /// Checks that `name` and `version` are present.
    pub(crate) fn validate(&self) -> Result<(), AgentError> {
        if self.name.is_empty() {
            return Err(AgentError::EmptyCapabilityName);
        }
        if self.version.is_empty() {
            return Err(AgentError::EmptyCapabilityVersion(self.name.clone()));
        }
        Ok(())
    }
}
