//! Inbound Port (Driving Port)

use shared_types::{SessionClaims, SessionToken};
use tokio::sync::watch;

use crate::error::CredentialError;

/// Accessor over the single session value.
pub trait CredentialStore: Send + Sync {
    /// Current token, if a session is established.
    fn get(&self) -> Option<SessionToken>;

    /// Store a new token, replacing any previous one.
    ///
    /// Tokens whose claims cannot be decoded are rejected.
    fn set(&self, token: SessionToken) -> Result<(), CredentialError>;

    /// Forget the session, durably. Idempotent.
    fn clear(&self) -> Result<(), CredentialError>;

    /// Presence notifications: `true` while a token is held.
    ///
    /// Every `set` and `clear` marks the value changed.
    fn subscribe(&self) -> watch::Receiver<bool>;

    /// Claims of the current token.
    fn claims(&self) -> Option<SessionClaims> {
        self.get().and_then(|token| token.claims().ok())
    }

    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
