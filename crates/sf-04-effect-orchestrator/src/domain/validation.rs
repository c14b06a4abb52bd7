//! Submit precondition.

use shared_types::{EntityKind, Record, ValidationError};

/// Check that every field the kind requires is present in the payload.
///
/// Missing fields are reported in the order the kind declares them.
pub fn validate_submit(kind: EntityKind, payload: &Record) -> Result<(), ValidationError> {
    let missing: Vec<String> = kind
        .config()
        .required_fields
        .iter()
        .filter(|field| !payload.is_present(field))
        .map(|field| (*field).to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { kind, missing })
    }
}
