//! Error types for the request gateway
//!
//! Settled calls never produce these: they become `Outcome`s. Only building
//! the gateway itself can fail.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP client construction failed: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}
