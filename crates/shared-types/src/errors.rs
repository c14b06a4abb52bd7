//! # Error Types
//!
//! Defines error types used across components.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::entities::EntityKind;

/// Message recorded against a missing required field.
pub const REQUIRED_MESSAGE: &str = "Required";

/// A Submit payload failed its local precondition check.
///
/// Never reaches the request gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} submit rejected: missing required fields {missing:?}")]
pub struct ValidationError {
    pub kind: EntityKind,
    /// Missing fields, in the order the kind declares them.
    pub missing: Vec<String>,
}

impl ValidationError {
    /// Per-field messages, as views render them next to inputs.
    #[must_use]
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        self.missing
            .iter()
            .map(|field| (field.clone(), REQUIRED_MESSAGE.to_string()))
            .collect()
    }
}

/// An entity kind name that matches no configured kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown entity kind: {0}")]
pub struct UnknownEntityKind(pub String);

/// Pagination parameters that violate the positive-integer preconditions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page size must be positive")]
    ZeroPageSize,
    #[error("page numbers start at 1")]
    ZeroPageNumber,
}

/// A session token that cannot be decoded into claims.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimsError {
    #[error("token is not a three-segment JWT")]
    Malformed,
    #[error("token payload is not valid base64url: {0}")]
    Encoding(String),
    #[error("token payload is not valid JSON: {0}")]
    Json(String),
    #[error("token claims carry no store id")]
    MissingStoreId,
}
