//! The entity store: every slice, reduced together.

use serde::{Deserialize, Serialize};
use shared_bus::SyncEvent;
use shared_types::{EntityKind, SessionClaims, StoreId};
use std::collections::BTreeMap;
use tracing::trace;

use crate::public::{AuthSlice, PublicSlice};
use crate::slice::EntitySlice;

/// All console state the engine owns.
///
/// Only the engine loop holds a mutable `EntityStore`; views read snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    pub slices: BTreeMap<EntityKind, EntitySlice>,
    pub public: PublicSlice,
    pub auth: AuthSlice,
}

impl EntityStore {
    /// Fresh store, authenticated if a session was restored.
    #[must_use]
    pub fn new(claims: Option<&SessionClaims>) -> Self {
        Self {
            slices: EntityKind::ALL
                .into_iter()
                .map(|kind| (kind, EntitySlice::new(kind)))
                .collect(),
            public: PublicSlice::default(),
            auth: AuthSlice::from_claims(claims),
        }
    }

    /// Slice of one kind.
    ///
    /// Every kind has a slice from construction onwards.
    #[must_use]
    pub fn slice(&self, kind: EntityKind) -> Option<&EntitySlice> {
        self.slices.get(&kind)
    }

    #[must_use]
    pub fn store_id(&self) -> Option<&StoreId> {
        self.auth.store_id()
    }

    /// Feed one event to every slice.
    pub fn apply(&mut self, event: &SyncEvent) {
        trace!(topic = ?event.topic(), kind = ?event.kind(), "Reducing event");

        self.slices = std::mem::take(&mut self.slices)
            .into_iter()
            .map(|(kind, slice)| (kind, slice.reduce(event)))
            .collect();
        self.public = std::mem::take(&mut self.public).reduce(event);
        self.auth = std::mem::take(&mut self.auth).reduce(event);
    }

    /// Functional form of [`EntityStore::apply`].
    #[must_use]
    pub fn reduce(mut self, event: &SyncEvent) -> Self {
        self.apply(event);
        self
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new(None)
    }
}
