//! Layered agent configuration.
//!
//! Settings are resolved in three layers, highest priority first:
//!
//! 1. Environment variables (`KEEL_AGENT_ID`, `KEEL_AGENT_NAME`,
//!    `KEEL_AGENT_VERSION`, `KEEL_LOG`)
//! 2. A TOML file
//! 3. Built-in defaults
//!
//! Values are not validated here; [`crate::agent::services::AgentBuilder`]
//! validates identity and capabilities when the agent is built.

mod error;

pub use error::ConfigError;

use crate::agent::domain::Capability;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`AgentConfig::id`].
pub const ENV_AGENT_ID: &str = "KEEL_AGENT_ID";
/// Environment variable overriding [`AgentConfig::name`].
pub const ENV_AGENT_NAME: &str = "KEEL_AGENT_NAME";
/// Environment variable overriding [`AgentConfig::version`].
pub const ENV_AGENT_VERSION: &str = "KEEL_AGENT_VERSION";
/// Environment variable overriding [`AgentConfig::log_filter`].
pub const ENV_LOG_FILTER: &str = "KEEL_LOG";

/// Agent settings loaded from file and environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent identifier.
    #[serde(default)]
    pub id: String,

    /// Agent name.
    #[serde(default)]
    pub name: String,

    /// Agent version.
    #[serde(default)]
    pub version: String,

    /// Advertised capabilities, in declaration order.
    #[serde(default)]
    pub capabilities: Vec<Capability>,

    /// `tracing` filter directive used by [`crate::telemetry::init_tracing`].
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "info".to_owned()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            version: String::new(),
            capabilities: Vec::new(),
            log_filter: default_log_filter(),
        }
    }
}

impl AgentConfig {
    /// Loads configuration from `path` (when given) and the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file exists but cannot be read or
    /// parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(file) => Self::load_from(file)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a TOML file, ignoring the environment.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, or
    /// [`ConfigError::Parse`] when it is not valid TOML for this structure.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no agent config file found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|err| match err {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the text is not valid TOML for
    /// this structure.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse { path: None, source })
    }

    /// Applies environment overrides using `lookup` to read variables.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(id) = read(ENV_AGENT_ID) {
            self.id = id;
        }
        if let Some(name) = read(ENV_AGENT_NAME) {
            self.name = name;
        }
        if let Some(version) = read(ENV_AGENT_VERSION) {
            self.version = version;
        }
        if let Some(filter) = read(ENV_LOG_FILTER) {
            self.log_filter = filter;
        }
    }

    /// Returns the conventional config path inside `dir`.
    #[must_use]
    pub fn default_path(dir: &Path) -> PathBuf {
        dir.join("agent.toml")
    }
}
