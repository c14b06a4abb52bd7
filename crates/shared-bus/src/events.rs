//! # Sync Events
//!
//! Every message the engine applies to the entity store. Routines produce
//! them, the engine loop reduces them, and the bus rebroadcasts them to
//! observers (views, diagnostics, the CLI).

use serde::{Deserialize, Serialize};
use shared_types::{
    EntityKind, IntentId, MediaRef, Operation, Outcome, PaginationRequest, PaginationResult,
    Record, ReferenceData, SessionClaims, SubmitMode, ValidationError,
};

/// All events that flow from the orchestrator into the entity store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SyncEvent {
    // =========================================================================
    // INTENT LIFECYCLE
    // =========================================================================
    /// A gateway call was issued for an intent.
    Issued {
        intent_id: IntentId,
        kind: Option<EntityKind>,
        op: Operation,
    },

    /// A Submit failed its local required-field check. No call was issued.
    SubmitRejected {
        intent_id: IntentId,
        error: ValidationError,
    },

    /// Synchronous reset of a slice's detail.
    DetailCleared { kind: EntityKind },

    // =========================================================================
    // SETTLED OUTCOMES
    // =========================================================================
    ListSettled {
        intent_id: IntentId,
        kind: EntityKind,
        page: PaginationRequest,
        outcome: Outcome<PaginationResult>,
    },

    DetailSettled {
        intent_id: IntentId,
        kind: EntityKind,
        id: String,
        outcome: Outcome<Record>,
    },

    Submitted {
        intent_id: IntentId,
        kind: EntityKind,
        mode: SubmitMode,
        outcome: Outcome<Record>,
    },

    StatusSettled {
        intent_id: IntentId,
        kind: EntityKind,
        id: String,
        status: String,
        outcome: Outcome<()>,
    },

    MediaUploaded {
        intent_id: IntentId,
        outcome: Outcome<MediaRef>,
    },

    ReferenceSettled {
        intent_id: IntentId,
        data: ReferenceData,
        outcome: Outcome<Vec<Record>>,
    },

    // =========================================================================
    // SESSION
    // =========================================================================
    LoginSettled {
        intent_id: IntentId,
        outcome: Outcome<SessionClaims>,
    },

    /// Explicit logout; every slice resets.
    LoggedOut,

    /// The session guard cleared the credential after an unauthorized outcome.
    SessionInvalidated,
}

impl SyncEvent {
    /// Get the topic for this event.
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Issued { .. } | Self::SubmitRejected { .. } | Self::DetailCleared { .. } => {
                EventTopic::Intent
            }
            Self::ListSettled { .. }
            | Self::DetailSettled { .. }
            | Self::Submitted { .. }
            | Self::StatusSettled { .. }
            | Self::MediaUploaded { .. }
            | Self::ReferenceSettled { .. } => EventTopic::Outcome,
            Self::LoginSettled { .. } | Self::LoggedOut | Self::SessionInvalidated => {
                EventTopic::Session
            }
        }
    }

    /// Entity kind whose slice this event targets, if any.
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::Issued { kind, .. } => *kind,
            Self::SubmitRejected { error, .. } => Some(error.kind),
            Self::DetailCleared { kind }
            | Self::ListSettled { kind, .. }
            | Self::DetailSettled { kind, .. }
            | Self::Submitted { kind, .. }
            | Self::StatusSettled { kind, .. } => Some(*kind),
            Self::MediaUploaded { .. }
            | Self::ReferenceSettled { .. }
            | Self::LoginSettled { .. }
            | Self::LoggedOut
            | Self::SessionInvalidated => None,
        }
    }

    /// Intent this event belongs to, if it came from a gateway-bound intent.
    #[must_use]
    pub fn intent_id(&self) -> Option<IntentId> {
        match self {
            Self::Issued { intent_id, .. }
            | Self::SubmitRejected { intent_id, .. }
            | Self::ListSettled { intent_id, .. }
            | Self::DetailSettled { intent_id, .. }
            | Self::Submitted { intent_id, .. }
            | Self::StatusSettled { intent_id, .. }
            | Self::MediaUploaded { intent_id, .. }
            | Self::ReferenceSettled { intent_id, .. }
            | Self::LoginSettled { intent_id, .. } => Some(*intent_id),
            Self::DetailCleared { .. } | Self::LoggedOut | Self::SessionInvalidated => None,
        }
    }

    /// Whether this event carries an `Outcome::Unauthorized`.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::ListSettled { outcome, .. } => outcome.is_unauthorized(),
            Self::DetailSettled { outcome, .. } | Self::Submitted { outcome, .. } => {
                outcome.is_unauthorized()
            }
            Self::StatusSettled { outcome, .. } => outcome.is_unauthorized(),
            Self::MediaUploaded { outcome, .. } => outcome.is_unauthorized(),
            Self::ReferenceSettled { outcome, .. } => outcome.is_unauthorized(),
            Self::LoginSettled { outcome, .. } => outcome.is_unauthorized(),
            Self::Issued { .. }
            | Self::SubmitRejected { .. }
            | Self::DetailCleared { .. }
            | Self::LoggedOut
            | Self::SessionInvalidated => false,
        }
    }

    /// Whether this is the last event its intent produces.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Issued { .. })
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Issued calls, rejected submits, detail resets.
    Intent,
    /// Settled gateway outcomes.
    Outcome,
    /// Login, logout, invalidation.
    Session,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Entity kinds to include. Empty means all kinds. Events that target no
    /// slice are never excluded by kind.
    pub kinds: Vec<EntityKind>,
    /// Restrict to a single intent.
    pub intent: Option<IntentId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            ..Self::default()
        }
    }

    /// Create a filter for events touching specific entity slices.
    #[must_use]
    pub fn kinds(kinds: Vec<EntityKind>) -> Self {
        Self {
            kinds,
            ..Self::default()
        }
    }

    /// Create a filter for the events of one intent.
    #[must_use]
    pub fn intent(intent_id: IntentId) -> Self {
        Self {
            intent: Some(intent_id),
            ..Self::default()
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &SyncEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let kind_match = self.kinds.is_empty()
            || event.kind().map_or(true, |kind| self.kinds.contains(&kind));

        let intent_match = self
            .intent
            .map_or(true, |wanted| event.intent_id() == Some(wanted));

        topic_match && kind_match && intent_match
    }
}
