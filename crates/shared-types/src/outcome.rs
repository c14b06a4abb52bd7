//! # Outcomes
//!
//! The terminal result of a gateway call. Produced exactly once per call that
//! reaches the gateway.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result of one settled gateway call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outcome<T> {
    /// 2xx with a decodable body.
    Success(T),
    /// HTTP 401. Handled globally, never surfaced as a per-entity error.
    Unauthorized,
    /// Any other non-2xx, a transport failure, or an undecodable body.
    Failure(FailureReason),
}

/// Coarse reason carried by `Outcome::Failure`.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum FailureReason {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("response could not be decoded: {0}")]
    Decode(String),
    #[error("local storage failed: {0}")]
    Storage(String),
}

/// Payload-free discriminant of an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeTag {
    Success,
    Unauthorized,
    Failure,
}

impl<T> Outcome<T> {
    #[must_use]
    pub fn tag(&self) -> OutcomeTag {
        match self {
            Self::Success(_) => OutcomeTag::Success,
            Self::Unauthorized => OutcomeTag::Unauthorized,
            Self::Failure(_) => OutcomeTag::Failure,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::Unauthorized => Outcome::Unauthorized,
            Self::Failure(reason) => Outcome::Failure(reason),
        }
    }

    /// Chain a fallible step onto a success; its error becomes a failure.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, FailureReason>) -> Outcome<U> {
        match self {
            Self::Success(value) => match f(value) {
                Ok(next) => Outcome::Success(next),
                Err(reason) => Outcome::Failure(reason),
            },
            Self::Unauthorized => Outcome::Unauthorized,
            Self::Failure(reason) => Outcome::Failure(reason),
        }
    }

    /// Drop the payload, keeping the tag and failure reason.
    pub fn discard(self) -> Outcome<()> {
        self.map(|_| ())
    }
}

impl Outcome<serde_json::Value> {
    /// Decode a successful JSON body into `T`.
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> Outcome<T> {
        self.and_then(|body| {
            serde_json::from_value(body).map_err(|e| FailureReason::Decode(e.to_string()))
        })
    }
}
