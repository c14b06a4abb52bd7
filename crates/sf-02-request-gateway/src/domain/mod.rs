//! Domain Layer
//!
//! Pure request description and outcome classification. No I/O.

pub mod classify;
pub mod config;
pub mod request;

pub use classify::classify;
pub use config::GatewayConfig;
pub use request::{ApiRequest, Method};
