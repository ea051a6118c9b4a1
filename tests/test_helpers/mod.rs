//! Isolated `KEEL_*` environment for configuration tests.

use keel::config::{ENV_AGENT_ID, ENV_AGENT_NAME, ENV_AGENT_VERSION, ENV_LOG_FILTER};
use std::env;
use std::ffi::OsString;
use std::sync::{Mutex, MutexGuard, PoisonError};

const KEEL_VARS: [&str; 4] = [ENV_AGENT_ID, ENV_AGENT_NAME, ENV_AGENT_VERSION, ENV_LOG_FILTER];

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Exclusive view of the agent's environment variables.
///
/// Creating one clears every `KEEL_*` override; dropping it puts back what
/// the process had before. Tests holding a `KeelEnv` run one at a time.
pub struct KeelEnv {
    saved: Vec<(&'static str, Option<OsString>)>,
    _lock: MutexGuard<'static, ()>,
}

impl KeelEnv {
    /// Takes the environment lock and starts with no overrides set.
    pub fn isolated() -> Self {
        let lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let saved = KEEL_VARS
            .iter()
            .map(|key| (*key, env::var_os(key)))
            .collect();
        for key in KEEL_VARS {
            // SAFETY: ENV_LOCK is held, so no other test touches the environment.
            unsafe { env::remove_var(key) };
        }
        Self { saved, _lock: lock }
    }

    /// Sets one override for the lifetime of this view.
    pub fn with(self, key: &str, value: &str) -> Self {
        assert!(KEEL_VARS.iter().any(|var| *var == key), "{key} is not an agent variable");
        // SAFETY: ENV_LOCK is held, so no other test touches the environment.
        unsafe { env::set_var(key, value) };
        self
    }
}

impl Drop for KeelEnv {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..) {
            // SAFETY: ENV_LOCK is still held until `_lock` drops after this.
            unsafe {
                match value {
                    Some(previous) => env::set_var(key, previous),
                    None => env::remove_var(key),
                }
            }
        }
    }
}
