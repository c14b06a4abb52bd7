//! # SF-04 Effect Orchestrator
//!
//! Consumes intents and runs one routine per intent. Each routine issues at
//! most one gateway call and emits exactly one settled event.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`)
//!   - `validation`: required-field precondition for Submit
//!   - `endpoints`: intent to `ApiRequest` mapping
//!
//! - **Ports Layer** (`ports/`)
//!   - `IntentDispatcher`: driving port views dispatch through
//!   - `EventSink`: driven port into the engine loop
//!
//! - **Routines** (`routines.rs`): one generic routine per operation,
//!   specialised by the entity kind's configuration record
//!
//! - **Service Layer** (`service.rs`)
//!   - `EffectOrchestrator`: validates, emits `Issued`, spawns the routine
//!
//! ## Scheduling
//!
//! Routines are spawned tasks that suspend only at the gateway call. Nothing
//! is deduplicated or cancelled: two identical intents both run, and their
//! outcomes reach the store in the order the calls settle.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod domain;
pub mod error;
pub mod ports;
pub mod routines;
pub mod service;

pub use domain::{validate_submit, Endpoints};
pub use error::DispatchError;
pub use ports::{Dispatched, EventSink, IntentDispatcher};
pub use service::EffectOrchestrator;
