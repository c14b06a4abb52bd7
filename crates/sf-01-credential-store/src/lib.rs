//! # SF-01 Credential Store
//!
//! Holds the session token. The only component allowed to write it.
//!
//! ## Architecture
//!
//! - **Ports Layer** (`ports/`)
//!   - `CredentialStore`: driving port used by the gateway, the session guard
//!     and the login routine (`get` / `set` / `clear` / `subscribe`)
//!   - `TokenStorage`: driven port over the persisted key holding the token
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `FileTokenStorage`: one file per console profile
//!   - `MemoryTokenStorage`: process-local, for tests and ephemeral sessions
//!
//! - **Service Layer** (`service.rs`)
//!   - `SessionCredentials`: caches the token, writes through to storage and
//!     notifies subscribers on every change
//!
//! ## Invariants
//!
//! - `clear()` is idempotent and removes the persisted key before returning,
//!   so a restart after logout never resurrects the session.
//! - A stored token that is empty or whose claims cannot be decoded is
//!   cleared at cold start.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{FileTokenStorage, MemoryTokenStorage};
pub use error::CredentialError;
pub use ports::{CredentialStore, TokenStorage};
pub use service::SessionCredentials;
