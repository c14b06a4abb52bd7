//! # Session
//!
//! The opaque session token and the claims the console reads from it.
//!
//! The token is a JWT; its payload carries `{ "data": { "storeId": ... } }`.
//! Claims are decoded without signature verification: the server verifies
//! the token on every call, the console only needs the scope.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::StoreId;
use crate::errors::ClaimsError;

/// Raw session token, sent verbatim in the `authorization` header.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the claims carried by this token.
    pub fn claims(&self) -> Result<SessionClaims, ClaimsError> {
        SessionClaims::decode(&self.0)
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Claims the console derives its scope from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub store_id: StoreId,
}

#[derive(Deserialize)]
struct Payload {
    data: Option<PayloadData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayloadData {
    store_id: Option<serde_json::Value>,
}

impl SessionClaims {
    /// Decode the payload segment of a JWT.
    pub fn decode(token: &str) -> Result<Self, ClaimsError> {
        let mut segments = token.trim().split('.');
        let (Some(_header), Some(payload), Some(_signature), None) = (
            segments.next(),
            segments.next(),
            segments.next(),
            segments.next(),
        ) else {
            return Err(ClaimsError::Malformed);
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ClaimsError::Encoding(e.to_string()))?;
        let payload: Payload =
            serde_json::from_slice(&bytes).map_err(|e| ClaimsError::Json(e.to_string()))?;

        // Store ids arrive as strings or numbers depending on the issuer.
        let store_id = match payload.data.and_then(|d| d.store_id) {
            Some(serde_json::Value::String(s)) if !s.is_empty() => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => return Err(ClaimsError::MissingStoreId),
        };

        Ok(Self {
            store_id: StoreId::new(store_id),
        })
    }
}
