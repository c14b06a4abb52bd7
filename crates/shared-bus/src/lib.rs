//! # Shared Bus - Sync Event Bus
//!
//! Rebroadcasts every event the engine applies to the entity store so views
//! and diagnostics can observe the engine without touching its state.
//!
//! ```text
//! ┌──────────────┐  SyncEvent   ┌──────────────┐  apply   ┌──────────────┐
//! │ Orchestrator │ ───────────▶ │ Engine loop  │ ───────▶ │ Entity store │
//! └──────────────┘              └──────┬───────┘          └──────────────┘
//!                                      │ publish()
//!                                      ▼
//!                               ┌──────────────┐ subscribe()  ┌───────┐
//!                               │  Event Bus   │ ───────────▶ │ Views │
//!                               └──────────────┘              └───────┘
//! ```
//!
//! The bus is lossy for slow observers. Anything that must see every event
//! (the session guard, the store) runs inside the engine loop instead.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, SyncEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before the oldest are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
