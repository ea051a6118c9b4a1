//! Keel: shared platform conventions for long-running agents.
//!
//! This crate provides the lifecycle manager that governs when an agent's
//! work may run, together with the error classification, configuration
//! loading, and logging setup shared by the services that embed it.
//!
//! # Architecture
//!
//! Keel follows hexagonal architecture principles:
//!
//! - **Domain**: Pure lifecycle rules with no locking or async concerns
//! - **Ports**: Extension points supplied by the embedding service
//! - **Services**: Construction and thread-safe orchestration
//!
//! # Modules
//!
//! - [`agent`]: Agent state machine, builder, and lifecycle operations
//! - [`config`]: Layered agent configuration
//! - [`error_code`]: Error categories shared by all errors in the crate
//! - [`telemetry`]: `tracing` subscriber setup

pub mod agent;
pub mod config;
pub mod error_code;
pub mod telemetry;
