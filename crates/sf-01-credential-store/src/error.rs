//! Error types for the credential store

use shared_types::ClaimsError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the session credential.
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("token storage I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session token rejected: {0}")]
    InvalidToken(#[from] ClaimsError),
}

impl CredentialError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
