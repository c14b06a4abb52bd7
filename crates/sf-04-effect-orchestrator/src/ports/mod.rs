//! Ports Layer
//!
//! - Driving port (inbound): `IntentDispatcher`
//! - Driven port (outbound): `EventSink`, plus `RequestGateway` and
//!   `CredentialStore` from their own crates

pub mod inbound;
pub mod outbound;

pub use inbound::{Dispatched, IntentDispatcher};
pub use outbound::EventSink;

#[cfg(test)]
pub(crate) use outbound::mocks;
