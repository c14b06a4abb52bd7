//! # SF-05 Session Guard
//!
//! Entity-agnostic observer of every settled outcome. On each
//! `Outcome::Unauthorized` it clears the credential store and signals a
//! navigation to the login boundary, exactly once per outcome.
//!
//! The guard is called synchronously by the engine loop for every event
//! before the event is reduced, so no routine can skip it and no lagging
//! subscriber can miss one.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod ports;
pub mod service;

pub use adapters::ChannelNavigator;
pub use ports::{Navigation, Navigator};
pub use service::SessionGuard;
