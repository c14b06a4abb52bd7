//! # Shared Types Crate
//!
//! This crate contains the types every component of the console sync engine
//! agrees on: which entity kinds exist and how they are addressed, the intent
//! messages views dispatch, and the outcome shape every gateway call settles
//! into.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: Per-kind behaviour (endpoint path, slice key,
//!   required fields) lives in one `EntityConfig` record per kind. Routines and
//!   reducers are written once and specialised by that record.
//! - **Loose records, strict envelopes**: Entity bodies stay JSON objects
//!   (`Record`) because the console only inspects a handful of fields, while
//!   everything the engine reasons about (intents, outcomes, pagination) is
//!   strongly typed.

pub mod entities;
pub mod errors;
pub mod intents;
pub mod media;
pub mod outcome;
pub mod pagination;
pub mod session;

pub use entities::*;
pub use errors::*;
pub use intents::*;
pub use media::{MediaFile, MediaRef};
pub use outcome::{FailureReason, Outcome, OutcomeTag};
pub use pagination::{ListResponse, PaginationRequest, PaginationResult};
pub use session::{SessionClaims, SessionToken};
