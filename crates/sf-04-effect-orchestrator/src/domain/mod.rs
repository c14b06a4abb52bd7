//! Domain Layer
//!
//! Pure functions over intents. No I/O.

pub mod endpoints;
pub mod validation;

pub use endpoints::{is_member_id, Endpoints};
pub use validation::validate_submit;
