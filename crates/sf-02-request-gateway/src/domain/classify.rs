//! Outcome classification.

use serde_json::Value;
use shared_types::{FailureReason, Outcome};

/// HTTP status that triggers global session invalidation.
pub const UNAUTHORIZED: u16 = 401;

/// Classify a response that reached the client.
///
/// Bodies are only inspected on 2xx. An empty 2xx body decodes to `null`.
#[must_use]
pub fn classify(status: u16, body: &[u8]) -> Outcome<Value> {
    if status == UNAUTHORIZED {
        return Outcome::Unauthorized;
    }
    if !(200..300).contains(&status) {
        return Outcome::Failure(FailureReason::Status(status));
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Outcome::Success(Value::Null);
    }
    match serde_json::from_slice(body) {
        Ok(value) => Outcome::Success(value),
        Err(e) => Outcome::Failure(FailureReason::Decode(e.to_string())),
    }
}
