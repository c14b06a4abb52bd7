//! Error types for intent dispatch

use sf_01_credential_store::CredentialError;
use shared_types::ValidationError;
use thiserror::Error;

/// Why an intent could not be dispatched.
///
/// Gateway failures are not dispatch errors: they settle as outcomes.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Submit payload failed the local precondition; no call was issued.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The id cannot address a single member path; no call was issued.
    #[error("invalid entity id: {0:?}")]
    InvalidId(String),

    /// The engine loop is gone; nothing can receive events.
    #[error("sync engine stopped")]
    EngineStopped,

    /// A waiter fell behind the event bus and may have missed its outcome.
    /// The intent itself still settles into the store.
    #[error("missed {0} events while waiting for the outcome")]
    EventsLagged(u64),

    /// Routines need a Tokio runtime to run on.
    #[error("intent dispatched outside a Tokio runtime")]
    NoRuntime,

    /// Logout could not remove the persisted credential.
    #[error("credential store error: {0}")]
    Credential(#[from] CredentialError),
}
