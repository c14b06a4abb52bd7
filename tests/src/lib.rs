//! # Storefront Console Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Scripted gateway, token builder, console harness
//! └── integration/      # Cross-crate flows through the running engine
//!     ├── scenarios.rs      # List, status patch, 401, validation, settle order
//!     └── session_flows.rs  # Login, logout, cold start, persistence
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sf-tests
//! cargo test -p sf-tests integration::scenarios::
//! ```

pub mod fixtures;
