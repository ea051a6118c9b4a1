//! Error types for configuration loading.

use crate::error_code::{Classified, ErrorCode};
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned while loading agent configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config file {path:?}")]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid.
    #[error("failed to parse config: {source}")]
    Parse {
        /// File the text came from, when loaded from disk.
        path: Option<PathBuf>,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },
}

impl Classified for ConfigError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Read { .. } => ErrorCode::Internal,
            Self::Parse { .. } => ErrorCode::Validation,
        }
    }
}
