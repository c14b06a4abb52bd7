//! Navigator adapters.

use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::debug;

use crate::ports::{Navigation, Navigator};

const SIGNAL_CAPACITY: usize = 64;

/// Broadcasts navigation signals to any number of listeners.
///
/// Every signal is delivered; nothing is coalesced.
pub struct ChannelNavigator {
    sender: broadcast::Sender<Navigation>,
    signals: AtomicU64,
}

impl ChannelNavigator {
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(SIGNAL_CAPACITY);
        Self {
            sender,
            signals: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<Navigation> {
        self.sender.subscribe()
    }

    /// Total signals sent, listened to or not.
    #[must_use]
    pub fn signals(&self) -> u64 {
        self.signals.load(Ordering::Relaxed)
    }
}

impl Default for ChannelNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, to: Navigation) {
        self.signals.fetch_add(1, Ordering::Relaxed);
        let receivers = self.sender.send(to).unwrap_or(0);
        debug!(to = ?to, receivers, "Navigation signalled");
    }
}
