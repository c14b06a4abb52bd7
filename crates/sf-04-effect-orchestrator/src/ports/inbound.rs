//! Inbound Port (Driving Port)

use shared_types::{Intent, IntentId};
use tokio::task::JoinHandle;

use crate::error::DispatchError;

/// Receipt for a dispatched intent.
#[derive(Debug)]
pub struct Dispatched {
    /// Correlates the intent with the events it produces.
    pub intent_id: IntentId,
    /// The routine's task. `None` for intents handled synchronously.
    pub handle: Option<JoinHandle<()>>,
}

impl Dispatched {
    /// Wait until the routine has emitted its settled event.
    ///
    /// The event may still be queued for the engine loop when this returns.
    pub async fn join(self) {
        if let Some(handle) = self.handle {
            let _ = handle.await;
        }
    }
}

/// The single entry point views dispatch intents through.
pub trait IntentDispatcher: Send + Sync {
    /// Start the routine for one intent.
    ///
    /// Fails only when the intent cannot be started at all: a Submit that
    /// fails validation, or an engine that is no longer running.
    fn dispatch(&self, intent: Intent) -> Result<Dispatched, DispatchError>;
}
