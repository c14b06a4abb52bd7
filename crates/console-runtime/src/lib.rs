//! # Console Runtime
//!
//! Assembles the sync engine and runs it.
//!
//! ## Startup Sequence
//!
//! 1. Load `ConsoleConfig` (TOML file, then `SF_*` environment overrides)
//! 2. Open the credential store; a corrupt persisted token is cleared
//! 3. Build the gateway, orchestrator and session guard (`ConsoleContainer`)
//! 4. Spawn the `SyncEngine` loop, seeded with the restored session
//! 5. Drive it through an `EngineHandle`

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod cli;
pub mod config;
pub mod container;
pub mod engine;

pub use config::{ConfigError, ConsoleConfig, PagingConfig};
pub use container::{ConsoleContainer, ContainerError};
pub use engine::{EngineHandle, SyncEngine};
