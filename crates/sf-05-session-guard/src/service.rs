//! Session guard service.

use sf_01_credential_store::{CredentialError, CredentialStore};
use shared_bus::SyncEvent;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use crate::ports::{Navigation, Navigator};

/// Enforces the global authentication lifecycle.
pub struct SessionGuard {
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    invalidations: AtomicU64,
}

impl SessionGuard {
    pub fn new(credentials: Arc<dyn CredentialStore>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            credentials,
            navigator,
            invalidations: AtomicU64::new(0),
        }
    }

    /// Inspect one event. Returns `true` when it invalidated the session.
    pub fn observe(&self, event: &SyncEvent) -> bool {
        if !event.is_unauthorized() {
            return false;
        }

        warn!(
            kind = ?event.kind(),
            intent_id = ?event.intent_id(),
            "Unauthorized outcome, invalidating session"
        );
        if let Err(e) = self.credentials.clear() {
            // The in-memory session is gone regardless; only persistence failed.
            warn!(error = %e, "Persisted credential could not be removed");
        }
        self.navigator.navigate(Navigation::Login);
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Enter the login boundary on purpose. Any stored session is dropped.
    pub fn enter_login(&self) -> Result<(), CredentialError> {
        if self.credentials.is_authenticated() {
            info!("Login boundary opened, dropping stored session");
        }
        self.credentials.clear()
    }

    /// Sessions invalidated so far.
    #[must_use]
    pub fn invalidations(&self) -> u64 {
        self.invalidations.load(Ordering::Relaxed)
    }
}
