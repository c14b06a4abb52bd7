//! Adapters Layer
//!
//! - `HttpGateway` - reqwest client against the storefront API

pub mod http;

pub use http::HttpGateway;
