//! # SF-02 Request Gateway
//!
//! Builds and issues authenticated HTTP calls against the storefront API and
//! classifies each settled call into an `Outcome`.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`)
//!   - `ApiRequest`, `Method`: transport-neutral description of one call
//!   - `classify`: status code + body to `Outcome`
//!   - `GatewayConfig`: base URL, upload path, timeouts
//!
//! - **Ports Layer** (`ports/`)
//!   - `RequestGateway`: the single seam the orchestrator calls through
//!
//! - **Adapters Layer** (`adapters/`)
//!   - `HttpGateway`: reqwest-backed implementation
//!
//! ## Classification
//!
//! | Settled call            | Outcome                          |
//! |-------------------------|----------------------------------|
//! | 2xx, JSON or empty body | `Success(body)`                  |
//! | 2xx, undecodable body   | `Failure(Decode)`                |
//! | 401                     | `Unauthorized`                   |
//! | other status            | `Failure(Status(code))`          |
//! | no response             | `Failure(Transport)`             |
//!
//! Calls are never retried.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

pub use adapters::HttpGateway;
pub use domain::{classify, ApiRequest, GatewayConfig, Method};
pub use error::GatewayError;
pub use ports::RequestGateway;
