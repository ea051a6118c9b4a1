//! Process-wide `tracing` setup.

use thiserror::Error;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Errors returned while installing the tracing subscriber.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The filter directive could not be parsed.
    #[error("invalid log filter '{filter}'")]
    InvalidFilter {
        /// Directive that was rejected.
        filter: String,
        /// Parser error.
        #[source]
        source: ParseError,
    },

    /// A global subscriber is already installed.
    #[error("tracing subscriber already installed: {0}")]
    AlreadyInstalled(String),
}

/// Builds an [`EnvFilter`] from a directive such as `info,keel=debug`.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when the directive is invalid.
pub fn env_filter(filter: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(filter).map_err(|source| TelemetryError::InvalidFilter {
        filter: filter.to_owned(),
        source,
    })
}

/// Installs a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] when `filter` is invalid, or
/// [`TelemetryError::AlreadyInstalled`] when a global subscriber exists.
pub fn init_tracing(filter: &str) -> Result<(), TelemetryError> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(filter)?)
        .with_target(true)
        .try_init()
        .map_err(|err| TelemetryError::AlreadyInstalled(err.to_string()))
}
