//! Entity slices and their reducer.

use serde::{Deserialize, Serialize};
use shared_bus::SyncEvent;
use shared_types::{EntityKind, Operation, Outcome, Record};
use std::collections::BTreeMap;
use std::num::NonZeroU32;

use crate::pagination::page_count;

/// Lifecycle flag shared by a slice's list and detail operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SliceStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error,
}

/// The most recently settled list page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListState {
    pub items: Vec<Record>,
    pub total_count: u64,
    /// Page size of the request that produced `items`.
    pub page_size: Option<NonZeroU32>,
    pub page_number: Option<NonZeroU32>,
}

impl ListState {
    /// Pages available at the current page size. 1 before any list settles.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.page_size
            .map_or(1, |size| page_count(self.total_count, size))
    }

    /// Item with the given `code`.
    #[must_use]
    pub fn item(&self, id: &str) -> Option<&Record> {
        self.items.iter().find(|item| item.code() == Some(id))
    }
}

/// Full record of the entity in view, or the empty sentinel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Detail {
    #[default]
    Empty,
    Loaded(Record),
}

impl Detail {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    #[must_use]
    pub fn record(&self) -> Option<&Record> {
        match self {
            Self::Loaded(record) => Some(record),
            Self::Empty => None,
        }
    }
}

/// State owned by one entity kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySlice {
    pub kind: EntityKind,
    pub list: ListState,
    pub detail: Detail,
    pub status: SliceStatus,
    /// Per-field messages from the last rejected Submit.
    pub field_errors: BTreeMap<String, String>,
}

impl EntitySlice {
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            list: ListState::default(),
            detail: Detail::Empty,
            status: SliceStatus::Idle,
            field_errors: BTreeMap::new(),
        }
    }

    /// Apply one event. Events for other kinds, and unauthorized outcomes,
    /// leave the slice as it was.
    ///
    /// The invalidation that follows an unauthorized outcome only moves a
    /// `pending` slice back to `idle`; list, detail and errors are kept.
    #[must_use]
    pub fn reduce(mut self, event: &SyncEvent) -> Self {
        match event {
            SyncEvent::LoggedOut => return Self::new(self.kind),
            SyncEvent::SessionInvalidated => {
                if self.status == SliceStatus::Pending {
                    self.status = SliceStatus::Idle;
                }
                return self;
            }
            _ => {}
        }
        if event.kind() != Some(self.kind) || event.is_unauthorized() {
            return self;
        }

        match event {
            SyncEvent::Issued { op, .. } => match op {
                Operation::FetchList | Operation::FetchDetail | Operation::UpdateStatus => {
                    self.status = SliceStatus::Pending;
                }
                Operation::Submit => {
                    self.status = SliceStatus::Pending;
                    self.field_errors.clear();
                }
                _ => {}
            },

            SyncEvent::SubmitRejected { error, .. } => {
                self.field_errors = error.field_errors();
            }

            SyncEvent::DetailCleared { .. } => {
                self.detail = Detail::Empty;
                self.status = SliceStatus::Idle;
                self.field_errors.clear();
            }

            SyncEvent::ListSettled { page, outcome, .. } => match outcome {
                Outcome::Success(result) => {
                    self.list = ListState {
                        items: result.items.clone(),
                        total_count: result.total_count,
                        page_size: Some(page.page_size),
                        page_number: Some(page.page_number),
                    };
                    self.status = SliceStatus::Success;
                }
                Outcome::Failure(_) => self.status = SliceStatus::Error,
                Outcome::Unauthorized => {}
            },

            SyncEvent::DetailSettled { outcome, .. } | SyncEvent::Submitted { outcome, .. } => {
                match outcome {
                    Outcome::Success(record) => {
                        // Wholesale replacement; fields of a previous entity never survive.
                        self.detail = Detail::Loaded(record.clone());
                        self.status = SliceStatus::Success;
                    }
                    Outcome::Failure(_) => self.status = SliceStatus::Error,
                    Outcome::Unauthorized => {}
                }
            }

            SyncEvent::StatusSettled {
                id,
                status,
                outcome,
                ..
            } => match outcome {
                Outcome::Success(()) => {
                    if let Some(item) = self
                        .list
                        .items
                        .iter_mut()
                        .find(|item| item.code() == Some(id.as_str()))
                    {
                        item.set_status(status);
                    }
                    self.status = SliceStatus::Success;
                }
                Outcome::Failure(_) => self.status = SliceStatus::Error,
                Outcome::Unauthorized => {}
            },

            SyncEvent::MediaUploaded { .. }
            | SyncEvent::ReferenceSettled { .. }
            | SyncEvent::LoginSettled { .. }
            | SyncEvent::LoggedOut
            | SyncEvent::SessionInvalidated => {}
        }

        self
    }
}
