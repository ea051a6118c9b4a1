//! Unit tests for the agent module.


use crate::agent::domain::AgentState;
use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use std::sync::{Arc, Mutex};

/// Clock returning a settable instant.
#[derive(Debug)]
pub(super) struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub(super) fn new() -> Self {
        let epoch = Utc
            .with_ymd_and_hms(2026, 1, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        Self(Mutex::new(epoch))
    }

    pub(super) fn advance(&self, delta: chrono::Duration) {
        let mut now = self.0.lock().expect("clock lock");
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock lock")
    }
}

/// Collects `(from, to)` pairs from a state-change handler.
#[derive(Debug, Clone, Default)]
pub(super) struct TransitionLog(Arc<Mutex<Vec<(AgentState, AgentState)>>>);

impl TransitionLog {
    pub(super) fn handler(&self) -> impl Fn(AgentState, AgentState) + Send + Sync + 'static {
        let entries = Arc::clone(&self.0);
        move |from, to| entries.lock().expect("log lock").push((from, to))
    }

    pub(super) fn entries(&self) -> Vec<(AgentState, AgentState)> {
        self.0.lock().expect("log lock").clone()
    }
}
