//! Outbound Ports (Driven Ports)

use shared_bus::SyncEvent;
use tokio::sync::mpsc;

use crate::error::DispatchError;

/// Where routines deliver the events they produce.
///
/// Implementations must preserve the order events are emitted in.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: SyncEvent) -> Result<(), DispatchError>;
}

impl EventSink for mpsc::UnboundedSender<SyncEvent> {
    fn emit(&self, event: SyncEvent) -> Result<(), DispatchError> {
        self.send(event).map_err(|_| DispatchError::EngineStopped)
    }
}
