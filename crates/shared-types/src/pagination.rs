//! # Pagination
//!
//! Request and result shapes for list fetches. Page size and page number are
//! `NonZeroU32`, so the positive-integer preconditions hold by construction.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::entities::{Record, StoreId};
use crate::errors::PaginationError;

/// One page request under a store scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationRequest {
    pub scope: StoreId,
    pub page_size: NonZeroU32,
    pub page_number: NonZeroU32,
}

impl PaginationRequest {
    /// Build a request, rejecting zero page sizes and page numbers.
    pub fn new(scope: StoreId, page_size: u32, page_number: u32) -> Result<Self, PaginationError> {
        let page_size = NonZeroU32::new(page_size).ok_or(PaginationError::ZeroPageSize)?;
        let page_number = NonZeroU32::new(page_number).ok_or(PaginationError::ZeroPageNumber)?;
        Ok(Self {
            scope,
            page_size,
            page_number,
        })
    }

    /// First page of the given size.
    pub fn first(scope: StoreId, page_size: u32) -> Result<Self, PaginationError> {
        Self::new(scope, page_size, 1)
    }

    /// Query pairs in the API's naming.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        vec![
            ("storeId".to_string(), self.scope.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
            ("pageNo".to_string(), self.page_number.to_string()),
        ]
    }
}

/// Wire shape of every list endpoint: `{ data: [...], count: <int> }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub data: Vec<Record>,
    #[serde(default)]
    pub count: u64,
}

/// A decoded list page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaginationResult {
    pub items: Vec<Record>,
    pub total_count: u64,
}

impl From<ListResponse> for PaginationResult {
    fn from(response: ListResponse) -> Self {
        Self {
            items: response.data,
            total_count: response.count,
        }
    }
}
