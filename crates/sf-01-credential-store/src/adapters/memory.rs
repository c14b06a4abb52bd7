//! Process-local token storage.

use parking_lot::Mutex;

use crate::error::CredentialError;
use crate::ports::TokenStorage;

/// Token held in memory only. Lost on restart.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with a value, as if left by a previous run.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }

    /// Raw stored value.
    #[must_use]
    pub fn peek(&self) -> Option<String> {
        self.slot.lock().clone()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Result<Option<String>, CredentialError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, token: &str) -> Result<(), CredentialError> {
        *self.slot.lock() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), CredentialError> {
        self.slot.lock().take();
        Ok(())
    }
}
