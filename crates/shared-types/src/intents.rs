//! # Intents
//!
//! One message per user or system action. Views build intents; the effect
//! orchestrator turns each into at most one gateway call.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::entities::{EntityKind, Record, StoreId};
use crate::media::MediaFile;
use crate::pagination::PaginationRequest;

/// Correlates an intent with the events it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IntentId(Uuid);

impl IntentId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for IntentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IntentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a Submit creates a new entity or updates an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmitMode {
    Create,
    Update { id: String },
}

/// Reference collections served outside any entity slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceData {
    Countries,
    Currencies,
}

impl ReferenceData {
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Countries => "/countries",
            Self::Currencies => "/currencies",
        }
    }
}

/// Operation discriminant shared by intents and events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    FetchList,
    FetchDetail,
    Submit,
    UpdateStatus,
    UploadMedia,
    ClearDetail,
    FetchReference,
    Login,
    Logout,
}

/// A request for the engine to perform one logical operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    FetchList {
        kind: EntityKind,
        page: PaginationRequest,
    },
    FetchDetail {
        kind: EntityKind,
        scope: StoreId,
        id: String,
    },
    Submit {
        kind: EntityKind,
        scope: StoreId,
        mode: SubmitMode,
        payload: Record,
    },
    UpdateStatus {
        kind: EntityKind,
        scope: StoreId,
        id: String,
        status: String,
    },
    UploadMedia {
        file: MediaFile,
    },
    ClearDetail {
        kind: EntityKind,
    },
    FetchReference {
        data: ReferenceData,
    },
    Login {
        username: String,
        password: String,
    },
    Logout,
}

impl Intent {
    /// The entity kind this intent targets, if any.
    #[must_use]
    pub fn kind(&self) -> Option<EntityKind> {
        match self {
            Self::FetchList { kind, .. }
            | Self::FetchDetail { kind, .. }
            | Self::Submit { kind, .. }
            | Self::UpdateStatus { kind, .. }
            | Self::ClearDetail { kind } => Some(*kind),
            Self::UploadMedia { .. }
            | Self::FetchReference { .. }
            | Self::Login { .. }
            | Self::Logout => None,
        }
    }

    #[must_use]
    pub fn operation(&self) -> Operation {
        match self {
            Self::FetchList { .. } => Operation::FetchList,
            Self::FetchDetail { .. } => Operation::FetchDetail,
            Self::Submit { .. } => Operation::Submit,
            Self::UpdateStatus { .. } => Operation::UpdateStatus,
            Self::UploadMedia { .. } => Operation::UploadMedia,
            Self::ClearDetail { .. } => Operation::ClearDetail,
            Self::FetchReference { .. } => Operation::FetchReference,
            Self::Login { .. } => Operation::Login,
            Self::Logout => Operation::Logout,
        }
    }

    /// Intents handled synchronously, without a gateway call.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::ClearDetail { .. } | Self::Logout)
    }
}
