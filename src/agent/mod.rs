//! Agent lifecycle management.
//!
//! An [`services::Agent`] moves through a fixed state machine
//! (`unknown -> starting -> running <-> paused -> stopping -> stopped`, with
//! `failed` reachable from any non-terminal state) under the control of its
//! callers. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Extension-point contracts in [`ports`]
//! - Construction and orchestration in [`services`]

pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
