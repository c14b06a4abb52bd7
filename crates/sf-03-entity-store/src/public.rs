//! Slices that belong to no entity kind.

use serde::{Deserialize, Serialize};
use shared_bus::SyncEvent;
use shared_types::{MediaRef, Operation, Outcome, Record, ReferenceData, SessionClaims, StoreId};

use crate::slice::SliceStatus;

/// Reference data and the last uploaded media reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PublicSlice {
    pub countries: Vec<Record>,
    pub currencies: Vec<Record>,
    /// Reference from the last successful upload, to be merged into the
    /// next Submit payload by the caller.
    pub uploaded_file: Option<MediaRef>,
    pub status: SliceStatus,
}

impl PublicSlice {
    #[must_use]
    pub fn reference(&self, data: ReferenceData) -> &[Record] {
        match data {
            ReferenceData::Countries => &self.countries,
            ReferenceData::Currencies => &self.currencies,
        }
    }

    #[must_use]
    pub fn reduce(mut self, event: &SyncEvent) -> Self {
        if event.is_unauthorized() {
            return self;
        }

        match event {
            SyncEvent::Issued {
                kind: None,
                op: Operation::FetchReference | Operation::UploadMedia,
                ..
            } => self.status = SliceStatus::Pending,

            SyncEvent::ReferenceSettled { data, outcome, .. } => match outcome {
                Outcome::Success(records) => {
                    match data {
                        ReferenceData::Countries => self.countries = records.clone(),
                        ReferenceData::Currencies => self.currencies = records.clone(),
                    }
                    self.status = SliceStatus::Success;
                }
                Outcome::Failure(_) => self.status = SliceStatus::Error,
                Outcome::Unauthorized => {}
            },

            SyncEvent::MediaUploaded { outcome, .. } => match outcome {
                Outcome::Success(media) => {
                    self.uploaded_file = Some(media.clone());
                    self.status = SliceStatus::Success;
                }
                Outcome::Failure(_) => self.status = SliceStatus::Error,
                Outcome::Unauthorized => {}
            },

            SyncEvent::SessionInvalidated if self.status == SliceStatus::Pending => {
                self.status = SliceStatus::Idle;
            }

            SyncEvent::LoggedOut => return Self::default(),

            _ => {}
        }

        self
    }
}

/// Session lifecycle as the views see it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum AuthSlice {
    #[default]
    Anonymous,
    Pending,
    Authenticated {
        store_id: StoreId,
    },
    /// The last login attempt did not produce a session.
    Rejected,
    /// The server refused the session; the credential has been cleared.
    Expired,
}

impl AuthSlice {
    /// Initial state for a session restored at cold start.
    #[must_use]
    pub fn from_claims(claims: Option<&SessionClaims>) -> Self {
        claims.map_or(Self::Anonymous, |claims| Self::Authenticated {
            store_id: claims.store_id.clone(),
        })
    }

    /// Scope for every entity operation, while authenticated.
    #[must_use]
    pub fn store_id(&self) -> Option<&StoreId> {
        match self {
            Self::Authenticated { store_id } => Some(store_id),
            _ => None,
        }
    }

    #[must_use]
    pub fn reduce(self, event: &SyncEvent) -> Self {
        match event {
            SyncEvent::Issued {
                op: Operation::Login,
                ..
            } => Self::Pending,
            SyncEvent::LoginSettled { outcome, .. } => match outcome {
                Outcome::Success(claims) => Self::Authenticated {
                    store_id: claims.store_id.clone(),
                },
                Outcome::Unauthorized | Outcome::Failure(_) => Self::Rejected,
            },
            SyncEvent::LoggedOut => Self::Anonymous,
            SyncEvent::SessionInvalidated => Self::Expired,
            _ => self,
        }
    }
}
