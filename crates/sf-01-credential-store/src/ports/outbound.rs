//! Outbound Port (Driven Port)
//!
//! The persisted key holding the raw token string. Absence of the key means
//! "logged out".

use crate::error::CredentialError;

/// Persisted storage for one opaque token string.
pub trait TokenStorage: Send + Sync {
    /// Read the stored value. `Ok(None)` when the key is absent.
    fn load(&self) -> Result<Option<String>, CredentialError>;

    /// Replace the stored value.
    fn save(&self, token: &str) -> Result<(), CredentialError>;

    /// Delete the key. Deleting an absent key succeeds.
    fn remove(&self) -> Result<(), CredentialError>;
}
