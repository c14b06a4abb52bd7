//! Ports Layer
//!
//! - Driving port (inbound): `CredentialStore`, the accessor every dependent
//!   receives explicitly
//! - Driven port (outbound): `TokenStorage`, the persisted key

pub mod inbound;
pub mod outbound;

pub use inbound::CredentialStore;
pub use outbound::TokenStorage;
