//! Credential service: the in-memory session value backed by persisted
//! storage.

use parking_lot::Mutex;
use shared_types::SessionToken;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::error::CredentialError;
use crate::ports::{CredentialStore, TokenStorage};

/// The single owner of the session token.
pub struct SessionCredentials<S: TokenStorage> {
    storage: S,
    token: Mutex<Option<SessionToken>>,
    presence: watch::Sender<bool>,
}

impl<S: TokenStorage> SessionCredentials<S> {
    /// Open the store, validating whatever the previous run left behind.
    ///
    /// An empty or undecodable stored token is removed from storage.
    pub fn open(storage: S) -> Result<Self, CredentialError> {
        let token = match storage.load()? {
            None => None,
            Some(raw) if raw.trim().is_empty() => {
                warn!("Stored session token is empty, clearing");
                storage.remove()?;
                None
            }
            Some(raw) => {
                let token = SessionToken::new(raw);
                match token.claims() {
                    Ok(claims) => {
                        info!(store_id = %claims.store_id, "Restored session");
                        Some(token)
                    }
                    Err(e) => {
                        warn!(error = %e, "Stored session token is corrupt, clearing");
                        storage.remove()?;
                        None
                    }
                }
            }
        };

        let (presence, _) = watch::channel(token.is_some());
        Ok(Self {
            storage,
            token: Mutex::new(token),
            presence,
        })
    }

    /// The backing storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: TokenStorage> CredentialStore for SessionCredentials<S> {
    fn get(&self) -> Option<SessionToken> {
        self.token.lock().clone()
    }

    fn set(&self, token: SessionToken) -> Result<(), CredentialError> {
        let claims = token.claims()?;

        let mut slot = self.token.lock();
        self.storage.save(token.as_str())?;
        *slot = Some(token);
        drop(slot);

        info!(store_id = %claims.store_id, "Session established");
        self.presence.send_replace(true);
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialError> {
        let mut slot = self.token.lock();
        let had_token = slot.take().is_some();
        // Memory is cleared even if the persisted key cannot be removed.
        let removed = self.storage.remove();
        drop(slot);

        if had_token {
            info!("Session cleared");
        }
        self.presence.send_replace(false);
        removed
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.presence.subscribe()
    }
}
