//! # SF-03 Entity Store
//!
//! State the views render from: one `EntitySlice` per entity kind, a
//! `PublicSlice` for reference data and uploads, and an `AuthSlice` for the
//! session lifecycle.
//!
//! Every reducer is a total function `(slice, event) -> slice`. Events that do
//! not concern a slice return it unchanged, so each slice observes the full
//! event stream without filtering.
//!
//! ## Status
//!
//! `status` is shared by list and detail operations. Views decide whether a
//! detail is loaded from `detail` alone, never from `status`.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod pagination;
pub mod public;
pub mod slice;
pub mod store;

pub use pagination::page_count;
pub use public::{AuthSlice, PublicSlice};
pub use slice::{Detail, EntitySlice, ListState, SliceStatus};
pub use store::EntityStore;
