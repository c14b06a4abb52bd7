//! Ports
//!
//! `Navigator` is how the guard reaches the view layer's router.

use serde::{Deserialize, Serialize};

/// Navigation targets the engine may force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Navigation {
    /// The login boundary.
    Login,
}

/// Receives forced navigation transitions.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: Navigation);
}
