//! Parsing of numeric attribute values from text.
//!
//! These follow the conventions of the OSM text formats: ids may be
//! negative, the other numbers may not, except that `-1` is accepted as an
//! alias for 0 wherever an unsigned value is expected.

use crate::error::{ObjectError, ObjectResult};
use crate::types::{ChangesetId, ObjectId, ObjectVersion, SignedUserId, UserId, MAX_VERSION};

fn starts_ok(input: &str) -> bool {
    input.chars().next().is_some_and(|c| !c.is_whitespace())
}

/// Parses an object id.
///
/// # Errors
///
/// Returns [`ObjectError::InvalidNumber`] for empty input, leading
/// whitespace, trailing characters, or values at the limits of `i64`.
pub fn string_to_object_id(input: &str) -> ObjectResult<ObjectId> {
    if starts_ok(input) {
        if let Ok(id) = input.parse::<i64>() {
            if id != i64::MIN && id != i64::MAX {
                return Ok(id);
            }
        }
    }
    Err(ObjectError::invalid_number("id", input))
}

/// Parses an unsigned value strictly below `limit`.
fn string_to_unsigned(input: &str, what: &'static str, limit: u64) -> ObjectResult<u64> {
    if input == "-1" {
        return Ok(0);
    }
    if starts_ok(input) && !input.starts_with('-') {
        if let Ok(value) = input.parse::<u64>() {
            if value < limit {
                return Ok(value);
            }
        }
    }
    Err(ObjectError::invalid_number(what, input))
}

/// Parses an object version. Values above [`MAX_VERSION`] are rejected.
///
/// # Errors
///
/// Returns [`ObjectError::InvalidNumber`] if the input is not a version.
pub fn string_to_object_version(input: &str) -> ObjectResult<ObjectVersion> {
    let value = string_to_unsigned(input, "version", u64::from(MAX_VERSION) + 1)?;
    Ok(value as ObjectVersion)
}

/// Parses a changeset id.
///
/// # Errors
///
/// Returns [`ObjectError::InvalidNumber`] if the input is not a changeset id.
pub fn string_to_changeset_id(input: &str) -> ObjectResult<ChangesetId> {
    string_to_unsigned(input, "changeset id", u64::MAX)
}

/// Parses a user id.
///
/// # Errors
///
/// Returns [`ObjectError::InvalidNumber`] if the input is not a user id.
pub fn string_to_user_id(input: &str) -> ObjectResult<UserId> {
    let value = string_to_unsigned(input, "user id", u64::from(UserId::MAX))?;
    Ok(value as UserId)
}

/// Parses a signed user id, as used by formats that write `-1` or other
/// negative values for anonymous edits.
///
/// # Errors
///
/// Returns [`ObjectError::InvalidNumber`] if the input is not an integer.
pub fn string_to_signed_user_id(input: &str) -> ObjectResult<SignedUserId> {
    if starts_ok(input) {
        if let Ok(value) = input.parse::<SignedUserId>() {
            return Ok(value);
        }
    }
    Err(ObjectError::invalid_number("user id", input))
}
